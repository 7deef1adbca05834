//! Convenient imports for Docseq.
//!
//! ```ignore
//! use docseq::prelude::*;
//!
//! let report = Docseq::open()?.run(RunMode::RowLock)?;
//! ```

// Main entry point
pub use crate::database::{Docseq, DocseqBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Strategies
pub use docseq_concurrency::{RetryConfig, Strategy, StrategyKind};

// Runs
pub use docseq_engine::{HarnessConfig, RunMode, RunReport};

// Core types
pub use docseq_core::{DepartmentId, Document, Reference};
