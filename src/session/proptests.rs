//! Property-based tests for the session state machine
//!
//! These tests drive a [`Session`] with arbitrary event sequences and check
//! that the transcript and pending invariants hold after every step.

use super::state::{topic_greeting, Role};
use super::*;
use crate::topics::all_topics;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_topic() -> impl Strategy<Value = &'static Topic> {
    (0..all_topics().len()).prop_map(|i| &all_topics()[i])
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9+=? ]{1,30}",
        1 => "[ \t\n]{0,5}",
    ]
}

/// A user or relay action. Relay completions pick a ticket offset relative
/// to the most recently issued one, so stale tickets are exercised too.
#[derive(Debug, Clone)]
enum Action {
    Select(&'static Topic),
    Send(String),
    Succeed { ticket_back: u64, text: String },
    Fail { ticket_back: u64 },
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        arb_topic().prop_map(Action::Select),
        arb_text().prop_map(Action::Send),
        ((0u64..2), "[a-z ]{1,20}").prop_map(|(ticket_back, text)| Action::Succeed { ticket_back, text }),
        (0u64..2).prop_map(|ticket_back| Action::Fail { ticket_back }),
    ]
}

fn apply(session: &mut Session, last_ticket: &mut Option<u64>, action: Action) {
    match action {
        Action::Select(topic) => session.select_topic(topic),
        Action::Send(text) => {
            if let Ok(pending) = session.begin_send(&text) {
                *last_ticket = Some(pending.ticket);
            }
        }
        Action::Succeed { ticket_back, text } => {
            let ticket = last_ticket.unwrap_or(0).saturating_sub(ticket_back);
            let _ = session.finish_send(ticket, Ok(text));
        }
        Action::Fail { ticket_back } => {
            let ticket = last_ticket.unwrap_or(0).saturating_sub(ticket_back);
            let _ = session.finish_send(ticket, Err(RelayFailure::new("boom")));
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The transcript is never empty, always opens with an assistant message,
    /// and pending implies a selected topic.
    #[test]
    fn prop_invariants_hold_for_any_sequence(
        actions in proptest::collection::vec(arb_action(), 0..40)
    ) {
        let mut session = Session::new();
        let mut last_ticket = None;
        for action in actions {
            apply(&mut session, &mut last_ticket, action);

            prop_assert!(!session.transcript().is_empty());
            prop_assert!(session.transcript()[0].is_assistant());
            if session.is_pending() {
                prop_assert!(session.selected_topic().is_some());
                prop_assert!(!session.can_send());
                prop_assert_eq!(session.transcript().last().map(|m| m.role), Some(Role::User));
            }
            prop_assert_eq!(
                session.can_send(),
                session.selected_topic().is_some() && !session.is_pending()
            );
        }
    }

    /// Rejected sends never change the transcript, no matter how often repeated
    #[test]
    fn prop_rejected_send_is_idempotent(
        topic in proptest::option::of(arb_topic()),
        first in "[a-z]{1,10}",
        repeats in proptest::collection::vec(arb_text(), 1..10),
    ) {
        let mut session = Session::new();
        if let Some(topic) = topic {
            session.select_topic(topic);
            session.begin_send(&first).unwrap();
        }
        let before = session.transcript().to_vec();
        let state_before = session.state().clone();

        for text in repeats {
            prop_assert!(session.begin_send(&text).is_err());
        }
        prop_assert_eq!(session.transcript(), before.as_slice());
        prop_assert_eq!(session.state(), &state_before);
    }

    /// Selecting a topic always yields a single assistant greeting naming it
    #[test]
    fn prop_select_topic_resets_to_greeting(
        actions in proptest::collection::vec(arb_action(), 0..20),
        topic in arb_topic(),
    ) {
        let mut session = Session::new();
        let mut last_ticket = None;
        for action in actions {
            apply(&mut session, &mut last_ticket, action);
        }

        session.select_topic(topic);
        prop_assert_eq!(session.transcript().len(), 1);
        prop_assert!(session.transcript()[0].is_assistant());
        prop_assert!(session.transcript()[0].text.contains(topic.display_name));
        prop_assert_eq!(&session.transcript()[0].text, &topic_greeting(topic));
        prop_assert!(!session.is_pending());
    }

    /// A send followed by its matching success grows the transcript by exactly
    /// two: the user message, then the reply.
    #[test]
    fn prop_send_then_success_appends_two(
        topic in arb_topic(),
        text in "[a-zA-Z0-9+=?]{1,30}",
        reply in "[a-zA-Z0-9 =]{1,30}",
    ) {
        let mut session = Session::new();
        session.select_topic(topic);
        let before = session.transcript().len();

        let pending = session.begin_send(&text).unwrap();
        prop_assert_eq!(&pending.request.system_message, topic.system_prompt);
        prop_assert_eq!(&pending.request.user_message, &text);
        session.finish_send(pending.ticket, Ok(reply.clone())).unwrap();

        let transcript = session.transcript();
        prop_assert_eq!(transcript.len(), before + 2);
        prop_assert_eq!(&transcript[before], &ChatMessage::user(text));
        prop_assert_eq!(&transcript[before + 1], &ChatMessage::assistant(reply));
        prop_assert!(!session.is_pending());
    }
}
