//! Engine error types

use docseq_core::StoreError;
use thiserror::Error;

/// Invalid run configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A run needs at least one worker
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// Work must be routed to at least one department
    #[error("department count must be at least 1")]
    NoDepartments,
}

/// Failure of a whole harness run
///
/// Per-item and per-worker failures are not errors at this level; they are
/// recorded in the [`RunReport`](crate::report::RunReport).
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration rejected before any worker started
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Store failed while taking the before/after snapshot
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A worker thread could not be spawned
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        /// Worker index
        worker: usize,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// A worker thread panicked
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}
