#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Client-side conversation state for the hotel assistant.
//!
//! The [`ConversationController`] owns everything the user sees (message
//! log, extracted preferences, hotel suggestions, loading flag) and keeps it
//! in sync with the remote service through an [`AssistantService`].
//! The [`render`] module turns that state into terminal text.
//!
//! [`AssistantService`]: hotelier_core::AssistantService

mod controller;
pub mod render;
mod session;

pub use controller::{ConversationConfig, ConversationController, PendingTurn, TurnOutcome};
pub use render::CardLimits;
pub use session::SessionState;
