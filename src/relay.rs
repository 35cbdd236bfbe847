//! Message relay between tutoring clients and the LLM provider
//!
//! Validates an inbound send request, composes the provider payload with the
//! topic's system prompt, and maps the provider's answer or failure onto the
//! relay's own contract. Holds no mutable state, so one instance serves all
//! requests concurrently.

use crate::api::{SendMessageRequest, UserMessage};
use crate::llm::{ContentPart, LlmError, LlmMessage, LlmRequest, LlmService};
use axum::http::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// User-safe message for every upstream failure
pub const UPSTREAM_ERROR_MESSAGE: &str = "Internal Server Error";

/// Errors surfaced to relay callers
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing or empty userMessage")]
    MissingUserMessage,
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
    /// Provider detail stays in the source; Display is the generic message
    #[error("Internal Server Error")]
    Upstream(#[source] LlmError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingUserMessage | RelayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::MissingUserMessage => "missing_user_message",
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::Upstream(_) => "upstream_error",
        }
    }
}

/// Stateless relay service
pub struct MessageRelayService {
    provider: Arc<dyn LlmService>,
}

impl MessageRelayService {
    pub fn new(provider: Arc<dyn LlmService>) -> Self {
        Self { provider }
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Relay one request and return the tutor's reply text.
    ///
    /// Validation failures return before any provider call. Provider failures
    /// are logged with full detail and returned as [`RelayError::Upstream`].
    pub async fn relay(&self, request: SendMessageRequest) -> Result<String, RelayError> {
        let llm_request = compose(request)?;

        tracing::debug!(
            model = %self.provider.model_id(),
            messages = llm_request.messages.len(),
            "Relaying message to provider"
        );

        self.provider
            .complete(&llm_request)
            .await
            .map(|response| response.text)
            .map_err(|e| {
                tracing::error!(
                    kind = e.kind.as_str(),
                    detail = %e.message,
                    "Provider call failed"
                );
                RelayError::Upstream(e)
            })
    }
}

/// Validate a send request and build the provider payload
pub fn compose(request: SendMessageRequest) -> Result<LlmRequest, RelayError> {
    let user_content = match request.user_message {
        None => return Err(RelayError::MissingUserMessage),
        Some(UserMessage::Text(text)) if text.trim().is_empty() => {
            return Err(RelayError::MissingUserMessage)
        }
        Some(UserMessage::Text(text)) => vec![ContentPart::Text { text }],
        Some(UserMessage::Parts(parts)) if parts.is_empty() => {
            return Err(RelayError::MissingUserMessage)
        }
        Some(UserMessage::Parts(parts)) => parts,
    };

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_message.filter(|s| !s.trim().is_empty()) {
        messages.push(LlmMessage::system(system));
    }
    messages.push(LlmMessage::user(user_content));

    Ok(LlmRequest { messages })
}
