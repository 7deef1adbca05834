//! Error types for document sequencing
//!
//! Two layers:
//! - [`StoreError`]: connectivity and transaction-level failures reported by
//!   the store. Never retried automatically.
//! - [`AppendError`]: what an append operation can fail with. A lost
//!   optimistic race is *not* an error; it is reported as an outcome by the
//!   strategy layer and only becomes [`AppendError::RetriesExhausted`] once
//!   the caller's retry budget is spent.

use crate::types::DepartmentId;
use thiserror::Error;

/// Store-level failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The connection is closed; statements and new transactions fail
    #[error("store connection closed")]
    Closed,

    /// Document insert referenced a department that does not exist
    #[error("foreign key violation: department {0} does not exist")]
    ForeignKey(DepartmentId),
}

/// Failure of a single append operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppendError {
    /// Target department has no row; the document was not inserted
    #[error("department {0} not found")]
    NotFound(DepartmentId),

    /// Optimistic update kept losing races until the retry budget ran out
    #[error("department {department}: gave up after {attempts} conflicting attempts")]
    RetriesExhausted {
        /// Contended department
        department: DepartmentId,
        /// Attempts made, all of which conflicted
        attempts: usize,
    },

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppendError {
    /// Whether this error only affects the current work item
    ///
    /// `NotFound` aborts one operation; the worker continues with its next
    /// item. Everything else stops the worker.
    pub fn is_item_local(&self) -> bool {
        matches!(self, AppendError::NotFound(_))
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppendError::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
