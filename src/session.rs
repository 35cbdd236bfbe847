//! Tutoring session state machine
//!
//! Follows the Elm Architecture: [`transition`] is pure and returns the next
//! [`SessionState`] plus a list of [`Effect`]s; [`Session`] owns the
//! transcript, applies the transcript effects, and hands relay effects to a
//! [`RelayClient`].

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatMessage, Role, SessionState};
pub use transition::{transition, TransitionError};

use crate::client::{RelayClient, RelayFailure, RelayRequest};
use crate::topics::Topic;
use uuid::Uuid;

/// A relay call the caller must now perform, then report via
/// [`Session::finish_send`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelay {
    pub ticket: u64,
    pub request: RelayRequest,
}

/// One client's tutoring session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    state: SessionState,
    transcript: Vec<ChatMessage>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            transcript: vec![ChatMessage::assistant(state::WELCOME_MESSAGE)],
            next_ticket: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn selected_topic(&self) -> Option<&'static Topic> {
        self.state.selected_topic()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Whether the send affordance should be enabled
    pub fn can_send(&self) -> bool {
        self.state.can_send()
    }

    /// Run one event through the state machine.
    ///
    /// Transcript effects are applied here; every effect is also returned so
    /// the caller can act on [`Effect::RequestRelay`]. On rejection nothing
    /// changes.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.state, event).inspect_err(|e| {
            tracing::debug!(session = %self.id, state = self.state.name(), reason = %e, "Event rejected");
        })?;

        tracing::debug!(
            session = %self.id,
            from = self.state.name(),
            to = result.new_state.name(),
            "Session transition"
        );
        self.state = result.new_state;

        for effect in &result.effects {
            match effect {
                Effect::ResetTranscript { greeting } => {
                    self.transcript.clear();
                    self.transcript.push(greeting.clone());
                }
                Effect::AppendMessage { message } => self.transcript.push(message.clone()),
                Effect::RequestRelay { .. } => {}
            }
        }

        Ok(result.effects)
    }

    pub fn select_topic(&mut self, topic: &'static Topic) {
        // Topic selection is accepted in every state
        if let Err(e) = self.handle(Event::SelectTopic { topic }) {
            tracing::warn!(session = %self.id, error = %e, "Topic selection rejected");
        }
    }

    /// Accept a user message and move to `AwaitingResponse`.
    ///
    /// The state flips before the caller starts the network call, so a second
    /// send is rejected until [`Session::finish_send`] runs.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingRelay, TransitionError> {
        let ticket = self.next_ticket;
        let effects = self.handle(Event::SendMessage {
            text: text.to_string(),
            ticket,
        })?;
        self.next_ticket += 1;

        effects
            .into_iter()
            .find_map(|effect| match effect {
                Effect::RequestRelay { ticket, request } => Some(PendingRelay { ticket, request }),
                _ => None,
            })
            .ok_or_else(|| TransitionError::InvalidTransition("send produced no relay".to_string()))
    }

    /// Apply the outcome of the relay call identified by `ticket`
    pub fn finish_send(
        &mut self,
        ticket: u64,
        outcome: Result<String, RelayFailure>,
    ) -> Result<(), TransitionError> {
        let event = match outcome {
            Ok(text) => Event::RelaySucceeded { ticket, text },
            Err(failure) => {
                tracing::warn!(session = %self.id, ticket, error = %failure, "Relay call failed");
                Event::RelayFailed { ticket }
            }
        };
        self.handle(event).map(|_| ())
    }

    /// Send a message and wait for the tutor's reply.
    ///
    /// Returns an error only when the send itself is rejected; a failed relay
    /// call is reported in the transcript instead.
    pub async fn send_message<C>(&mut self, client: &C, text: &str) -> Result<(), TransitionError>
    where
        C: RelayClient + ?Sized,
    {
        let pending = self.begin_send(text)?;
        let outcome = client.relay(&pending.request).await;
        self.finish_send(pending.ticket, outcome)
    }
}
