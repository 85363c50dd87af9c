use std::time::Duration;
use thiserror::Error;

/// Failure of a call to the assistant service.
///
/// The controller collapses all of these into the same user-visible handling
/// per endpoint; the variants exist so logs and callers can tell them apart.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("no active session")]
    NoSession,
}

impl ServiceError {
    /// Short label used in structured log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
            Self::NoSession => "no_session",
        }
    }
}
