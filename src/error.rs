//! Error types for Begrepsbro.
//!
//! - [`GenerationError`] is what the gateway hands back to callers.
//! - [`PersistenceError`] is raised by history storage adapters and absorbed
//!   by [`HistoryStore`](crate::history::HistoryStore).
//! - [`BroError`] covers setup failures (config, provider construction).

use thiserror::Error;

/// Failure of a single `generate` call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing or blank input. Rejected before any provider call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered, but the structured output did not match the
    /// result schema.
    #[error("structured output did not match schema: {0}")]
    SchemaViolation(String),

    /// Transport, quota, auth, timeout or any other upstream failure.
    /// Details are logged, never carried.
    #[error("failed to generate response")]
    GenerationFailed,
}

impl GenerationError {
    /// `true` when the caller can fix the problem by changing its input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Local history storage is unavailable or its contents are unreadable.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Setup-level errors.
#[derive(Debug, Error)]
pub enum BroError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, BroError>;
