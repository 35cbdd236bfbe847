//! API request and response types

use crate::llm::ContentPart;
use serde::{Deserialize, Serialize};

/// Request to relay one message to the tutor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Topic system prompt; omitted from the provider payload when blank
    #[serde(default)]
    pub system_message: Option<String>,
    #[serde(default)]
    pub user_message: Option<UserMessage>,
}

/// User message content: plain text, or already-structured content parts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserMessage {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Successful relay response
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub response: String,
}

/// Topic catalog entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicInfo {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub system_prompt: String,
}

/// Response for topic list
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicInfo>,
}

/// Response for version
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
