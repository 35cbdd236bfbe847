//! Session state types

use crate::topics::Topic;
use serde::{Deserialize, Serialize};

/// Greeting shown before any topic is chosen
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your AI math tutor. Please select a topic you'd like to learn about.";

/// Assistant message appended when a relay call fails for any reason
pub const RELAY_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't reach the tutor right now. Please try again.";

/// Greeting that opens a fresh transcript for `topic`
pub fn topic_greeting(topic: &Topic) -> String {
    format!(
        "Great choice! I'm ready to help you with {}. What would you like to know?",
        topic.display_name
    )
}

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub role: Role,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::Assistant,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Session phase. The selected topic and the pending flag are carried here
/// rather than stored separately, so "pending without a topic" cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No topic selected yet
    #[default]
    Idle,

    /// Topic chosen, ready for input
    TopicSelected { topic: &'static Topic },

    /// Relay call in flight
    AwaitingResponse {
        topic: &'static Topic,
        /// Ticket of the call being awaited; other completions are stale
        ticket: u64,
    },
}

impl SessionState {
    pub fn selected_topic(&self) -> Option<&'static Topic> {
        match self {
            SessionState::Idle => None,
            SessionState::TopicSelected { topic }
            | SessionState::AwaitingResponse { topic, .. } => Some(*topic),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::AwaitingResponse { .. })
    }

    /// Whether the message input should be enabled
    pub fn can_send(&self) -> bool {
        matches!(self, SessionState::TopicSelected { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::TopicSelected { .. } => "topic_selected",
            SessionState::AwaitingResponse { .. } => "awaiting_response",
        }
    }
}
