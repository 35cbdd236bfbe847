//! Pure state transition function
//!
//! Given the same state and event this always produces the same result, with
//! no I/O. Rejected events leave the state untouched; the caller treats them
//! as no-ops.

use super::state::{topic_greeting, ChatMessage, RELAY_FAILURE_MESSAGE};
use super::{Effect, Event, SessionState};
use crate::client::RelayRequest;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Select a topic before sending a message")]
    NoTopicSelected,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Waiting for the tutor to reply")]
    AwaitingResponse,
    #[error("No relay call is in flight")]
    NotAwaitingResponse,
    #[error("Relay completion {received} is stale (awaiting {awaiting})")]
    StaleResponse { awaiting: u64, received: u64 },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Topic Selection
        // ============================================================

        // Any state + SelectTopic -> TopicSelected with a fresh transcript.
        // An in-flight call becomes stale: its ticket no longer matches.
        (_, Event::SelectTopic { topic }) => Ok(TransitionResult::new(
            SessionState::TopicSelected { topic },
        )
        .with_effect(Effect::ResetTranscript {
            greeting: ChatMessage::assistant(topic_greeting(topic)),
        })),

        // ============================================================
        // Sending
        // ============================================================
        (SessionState::Idle, Event::SendMessage { .. }) => Err(TransitionError::NoTopicSelected),

        (SessionState::AwaitingResponse { .. }, Event::SendMessage { .. }) => {
            Err(TransitionError::AwaitingResponse)
        }

        (SessionState::TopicSelected { .. }, Event::SendMessage { text, .. })
            if text.trim().is_empty() =>
        {
            Err(TransitionError::EmptyMessage)
        }

        // TopicSelected + SendMessage -> AwaitingResponse
        (SessionState::TopicSelected { topic }, Event::SendMessage { text, ticket }) => {
            let request = RelayRequest {
                system_message: topic.system_prompt.to_string(),
                user_message: text.clone(),
            };
            Ok(TransitionResult::new(SessionState::AwaitingResponse {
                topic: *topic,
                ticket,
            })
            .with_effect(Effect::append_user(text))
            .with_effect(Effect::RequestRelay { ticket, request }))
        }

        // ============================================================
        // Relay Completion
        // ============================================================
        (
            SessionState::AwaitingResponse { topic, ticket },
            Event::RelaySucceeded {
                ticket: received,
                text,
            },
        ) if *ticket == received => Ok(TransitionResult::new(SessionState::TopicSelected {
            topic: *topic,
        })
        .with_effect(Effect::append_assistant(text))),

        (
            SessionState::AwaitingResponse { topic, ticket },
            Event::RelayFailed { ticket: received },
        ) if *ticket == received => Ok(TransitionResult::new(SessionState::TopicSelected {
            topic: *topic,
        })
        .with_effect(Effect::append_assistant(RELAY_FAILURE_MESSAGE))),

        (
            SessionState::AwaitingResponse { ticket, .. },
            Event::RelaySucceeded {
                ticket: received, ..
            }
            | Event::RelayFailed { ticket: received },
        ) => Err(TransitionError::StaleResponse {
            awaiting: *ticket,
            received,
        }),

        (
            SessionState::Idle | SessionState::TopicSelected { .. },
            Event::RelaySucceeded { .. } | Event::RelayFailed { .. },
        ) => Err(TransitionError::NotAwaitingResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::Role;
    use crate::topics::find_topic;
    use crate::topics::Topic;

    fn algebra() -> &'static Topic {
        find_topic("algebra").unwrap()
    }

    fn geometry() -> &'static Topic {
        find_topic("geometry").unwrap()
    }

    #[test]
    fn test_select_topic_from_idle() {
        let result = transition(&SessionState::Idle, Event::SelectTopic { topic: algebra() }).unwrap();
        assert_eq!(result.new_state, SessionState::TopicSelected { topic: algebra() });
        assert_eq!(
            result.effects,
            vec![Effect::ResetTranscript {
                greeting: ChatMessage::assistant(
                    "Great choice! I'm ready to help you with Algebra. What would you like to know?"
                ),
            }]
        );
    }

    #[test]
    fn test_select_topic_while_awaiting_clears_pending() {
        let state = SessionState::AwaitingResponse {
            topic: algebra(),
            ticket: 4,
        };
        let result = transition(&state, Event::SelectTopic { topic: geometry() }).unwrap();
        assert_eq!(result.new_state, SessionState::TopicSelected { topic: geometry() });
        assert!(!result.new_state.is_pending());
    }

    #[test]
    fn test_send_from_idle_rejected() {
        let err = transition(
            &SessionState::Idle,
            Event::SendMessage {
                text: "solve x+2=5".to_string(),
                ticket: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::NoTopicSelected);
    }

    #[test]
    fn test_send_blank_rejected() {
        let state = SessionState::TopicSelected { topic: algebra() };
        for text in ["", "   ", "\n\t"] {
            let err = transition(
                &state,
                Event::SendMessage {
                    text: text.to_string(),
                    ticket: 0,
                },
            )
            .unwrap_err();
            assert_eq!(err, TransitionError::EmptyMessage);
        }
    }

    #[test]
    fn test_send_requests_relay_with_topic_prompt() {
        let state = SessionState::TopicSelected { topic: algebra() };
        let result = transition(
            &state,
            Event::SendMessage {
                text: "solve x+2=5".to_string(),
                ticket: 7,
            },
        )
        .unwrap();

        assert_eq!(
            result.new_state,
            SessionState::AwaitingResponse {
                topic: algebra(),
                ticket: 7
            }
        );
        assert_eq!(
            result.effects,
            vec![
                Effect::append_user("solve x+2=5"),
                Effect::RequestRelay {
                    ticket: 7,
                    request: RelayRequest {
                        system_message: algebra().system_prompt.to_string(),
                        user_message: "solve x+2=5".to_string(),
                    },
                },
            ]
        );
    }

    #[test]
    fn test_send_while_awaiting_rejected() {
        let state = SessionState::AwaitingResponse {
            topic: algebra(),
            ticket: 1,
        };
        let err = transition(
            &state,
            Event::SendMessage {
                text: "again".to_string(),
                ticket: 2,
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::AwaitingResponse);
    }

    #[test]
    fn test_relay_success_appends_assistant_reply() {
        let state = SessionState::AwaitingResponse {
            topic: algebra(),
            ticket: 1,
        };
        let result = transition(
            &state,
            Event::RelaySucceeded {
                ticket: 1,
                text: "x = 3".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, SessionState::TopicSelected { topic: algebra() });
        assert_eq!(result.effects, vec![Effect::append_assistant("x = 3")]);
    }

    #[test]
    fn test_relay_failure_appends_fixed_message() {
        let state = SessionState::AwaitingResponse {
            topic: algebra(),
            ticket: 1,
        };
        let result = transition(&state, Event::RelayFailed { ticket: 1 }).unwrap();
        assert_eq!(result.new_state, SessionState::TopicSelected { topic: algebra() });
        match result.effects.as_slice() {
            [Effect::AppendMessage { message }] => {
                assert_eq!(message.role, Role::Assistant);
                assert_eq!(message.text, RELAY_FAILURE_MESSAGE);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_stale_completion_rejected() {
        let state = SessionState::AwaitingResponse {
            topic: geometry(),
            ticket: 2,
        };
        let err = transition(
            &state,
            Event::RelaySucceeded {
                ticket: 1,
                text: "x = 3".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransitionError::StaleResponse {
                awaiting: 2,
                received: 1
            }
        );
    }

    #[test]
    fn test_completion_without_pending_call_rejected() {
        let states = [
            SessionState::Idle,
            SessionState::TopicSelected { topic: algebra() },
        ];
        for state in states {
            assert_eq!(
                transition(&state, Event::RelayFailed { ticket: 0 }).unwrap_err(),
                TransitionError::NotAwaitingResponse
            );
            assert_eq!(
                transition(
                    &state,
                    Event::RelaySucceeded {
                        ticket: 0,
                        text: "late".to_string()
                    }
                )
                .unwrap_err(),
                TransitionError::NotAwaitingResponse
            );
        }
    }
}
