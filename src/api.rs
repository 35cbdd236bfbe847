//! HTTP API for the tutoring relay

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::LlmService;
use crate::relay::MessageRelayService;
use std::sync::Arc;

/// Application state shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<MessageRelayService>,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmService>) -> Self {
        Self {
            relay: Arc::new(MessageRelayService::new(provider)),
        }
    }
}
