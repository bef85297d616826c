//! Engine error type.
//!
//! Input and state errors are returned to the caller so the UI can show
//! feedback. Persistence errors are recovered inside the engine and only
//! logged; they surface through `Result` where a caller asked for the
//! storage operation directly.

use thiserror::Error;

/// Errors produced by the scorekeeper engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Non-numeric or out-of-range target, count, index or slot.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation requested while no game is in progress.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Stored JSON could not be parsed.
    #[error("corrupt persisted data: {0}")]
    PersistenceCorrupt(String),

    /// The storage backend failed to read or write.
    #[error("storage unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl ScoreError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }

    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::PersistenceCorrupt(detail.into())
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::PersistenceUnavailable(detail.into())
    }

    /// Errors the UI layer should report to the user.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidState(_))
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceCorrupt(err.to_string())
    }
}

impl From<std::io::Error> for ScoreError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceUnavailable(err.to_string())
    }
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, ScoreError>;
