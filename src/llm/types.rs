//! Common types for LLM interactions

use serde::{Deserialize, Serialize};

/// LLM request. One stateless exchange: an optional system entry followed
/// by a single user entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
}

/// Message in the provider payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: Vec<ContentPart>,
}

impl LlmMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: vec![ContentPart::text(text)],
        }
    }

    pub fn user(content: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One unit of message content in the provider's "array of typed parts"
/// format. Unknown `type` tags fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(s: impl Into<String>) -> Self {
        ContentPart::Text { text: s.into() }
    }
}

/// Image reference (URL or data URI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// LLM response
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// Content of the first choice
    pub text: String,
    pub usage: Usage,
}

/// Usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
