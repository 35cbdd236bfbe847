//! MathWise Tutor - topic-focused AI math tutoring
//!
//! The server relays each student message, together with the chosen topic's
//! system prompt, to an LLM provider. The client side is a small session
//! state machine that decides what may be sent and when.

pub mod api;
pub mod client;
pub mod config;
pub mod llm;
pub mod relay;
pub mod session;
pub mod topics;
