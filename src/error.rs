//! Unified error types for Docseq.
//!
//! Wraps the errors of the storage, strategy and engine layers behind one
//! enum so callers of the facade match on a single type.

use docseq_concurrency::ParseStrategyError;
use docseq_core::{AppendError, StoreError};
use docseq_engine::{ConfigError, HarnessError, ParseModeError};
use thiserror::Error;

/// All Docseq errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Department does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Optimistic append gave up after its retry budget
    #[error("conflict: {0}")]
    Conflict(String),

    /// Rejected configuration or unknown name
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Store unavailable or constraint violated
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Docseq operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// An exhausted optimistic append may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<AppendError> for Error {
    fn from(e: AppendError) -> Self {
        match e {
            AppendError::NotFound(id) => Error::NotFound(format!("department {}", id)),
            e @ AppendError::RetriesExhausted { .. } => Error::Conflict(e.to_string()),
            AppendError::Store(e) => e.into(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<HarnessError> for Error {
    fn from(e: HarnessError) -> Self {
        match e {
            HarnessError::Config(e) => e.into(),
            HarnessError::Store(e) => e.into(),
            e @ HarnessError::Spawn { .. } => Error::Internal(e.to_string()),
            e @ HarnessError::WorkerPanicked(_) => Error::Internal(e.to_string()),
        }
    }
}

impl From<ParseStrategyError> for Error {
    fn from(e: ParseStrategyError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<ParseModeError> for Error {
    fn from(e: ParseModeError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
