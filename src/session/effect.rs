//! Effects produced by state transitions

use super::state::ChatMessage;
use crate::client::RelayRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the transcript with a single greeting
    ResetTranscript { greeting: ChatMessage },

    /// Append to the transcript
    AppendMessage { message: ChatMessage },

    /// Issue a relay call; its completion must carry `ticket`
    RequestRelay { ticket: u64, request: RelayRequest },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: ChatMessage::user(text),
        }
    }

    pub fn append_assistant(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: ChatMessage::assistant(text),
        }
    }
}
