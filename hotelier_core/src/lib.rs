#![deny(
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

//! Shared data model for the hotel assistant client.
//!
//! Everything the remote assistant service sends or receives is described
//! here, together with the [`AssistantService`] seam the conversation
//! controller talks through.

pub mod context;
pub mod error;
pub mod hotel;
pub mod message;
pub mod service;

pub use context::UserContext;
pub use error::ServiceError;
pub use hotel::{Hotel, Location};
pub use message::{Message, Role};
pub use service::{
    AssistantService, ChatRequest, ChatResponse, ConversationSnapshot, HistoryEntry,
    NewSessionResponse,
};
