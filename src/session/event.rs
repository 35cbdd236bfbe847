//! Events that can occur in a tutoring session

use crate::topics::Topic;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    SelectTopic {
        topic: &'static Topic,
    },
    SendMessage {
        text: String,
        /// Ticket the resulting relay call will carry
        ticket: u64,
    },

    // Relay events
    RelaySucceeded {
        ticket: u64,
        text: String,
    },
    RelayFailed {
        ticket: u64,
    },
}
