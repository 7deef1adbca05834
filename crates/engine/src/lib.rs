//! Run engine for docseq
//!
//! Drives strategies under contention and checks the outcome:
//! - WorkGenerator: deterministic stream of append operations
//! - Harness: fixed worker pool sharing one store and one strategy
//! - RunReport: expected vs actual counters, documents and duplicates
//! - RunMode: the five canned experiments

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod harness;
pub mod mode;
pub mod report;
pub mod work;

pub use error::{ConfigError, HarnessError};
pub use harness::{Harness, HarnessConfig};
pub use mode::{ParseModeError, RunMode, MODE_DEPARTMENTS};
pub use report::{DepartmentReport, RunReport, WorkerReport};
pub use work::{WorkGenerator, WorkItem};
