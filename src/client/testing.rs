//! Mock relay client for session tests

use super::{RelayClient, RelayFailure, RelayRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock relay client that returns queued outcomes
#[derive(Default)]
pub struct MockRelayClient {
    outcomes: Mutex<VecDeque<Result<String, RelayFailure>>>,
    /// Record of all requests made
    requests: Mutex<Vec<RelayRequest>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(RelayFailure::new(message)));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RelayRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn relay(&self, request: &RelayRequest) -> Result<String, RelayFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayFailure::new("No mock outcome queued")))
    }
}
