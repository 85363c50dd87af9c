//! Session lifecycle.
//!
//! ```text
//! Uninitialized --create ok--> Active --clear--> Clearing --create ok--> Active
//!                                                    \--create failed--> Uninitialized
//! ```

/// Where the controller is in its session lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session yet, or the last attempt to obtain one failed.
    #[default]
    Uninitialized,
    /// Messages may be sent.
    Active { session_id: String },
    /// A clear is in progress; `previous` is being discarded server-side.
    Clearing { previous: String },
}

impl SessionState {
    /// The id messages may currently be sent with.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Active { session_id } => Some(session_id),
            Self::Uninitialized | Self::Clearing { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Active { .. } => "active",
            Self::Clearing { .. } => "clearing",
        }
    }
}
