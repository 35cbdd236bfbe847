//! Client side of the relay
//!
//! Sends one request to `POST /api/sendMessage`. Transport errors, non-2xx
//! replies, and malformed bodies all collapse into [`RelayFailure`]; the
//! session cannot tell a provider outage from a dropped connection.

#[cfg(test)]
pub(crate) mod testing;

use crate::api::{ErrorResponse, SendMessageResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload for one relay call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub system_message: String,
    pub user_message: String,
}

/// Any failed relay call. `message` is for logs only.
#[derive(Debug, Error)]
#[error("relay failed: {message}")]
pub struct RelayFailure {
    pub message: String,
}

impl RelayFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends relay requests on behalf of a session
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Relay one request and return the tutor's reply text
    async fn relay(&self, request: &RelayRequest) -> Result<String, RelayFailure>;
}

/// HTTP implementation talking to the relay server
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5020`
    pub fn new(base_url: &str) -> Result<Self, RelayFailure> {
        // No timeout: a call runs until the transport gives up
        let client = Client::builder()
            .build()
            .map_err(|e| RelayFailure::new(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/sendMessage", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, request: &RelayRequest) -> Result<String, RelayFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayFailure::new(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayFailure::new(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map_or(body, |e| e.error);
            return Err(RelayFailure::new(format!("HTTP {status}: {detail}")));
        }

        serde_json::from_str::<SendMessageResponse>(&body)
            .map(|r| r.response)
            .map_err(|e| RelayFailure::new(format!("Malformed response: {e}")))
    }
}
