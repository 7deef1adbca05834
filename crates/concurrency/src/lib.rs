//! Concurrency strategies for document sequencing
//!
//! Four interchangeable ways to run "read department → derive reference →
//! increment counter + insert document" as one logical operation:
//! - [`uncoordinated`]: no coordination; race-prone baseline
//! - [`application_lock`]: one process-wide critical section
//! - [`row_lock`]: `SELECT ... FOR UPDATE` row locking in the store
//! - [`optimistic`]: version-guarded conditional update, retried by the
//!   caller via [`append_with_retry`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application_lock;
mod increment;
pub mod optimistic;
pub mod retry;
pub mod row_lock;
pub mod strategy;
pub mod uncoordinated;

#[cfg(test)]
mod testing;

pub use application_lock::ApplicationLock;
pub use retry::{append_with_retry, Committed, RetryConfig};
pub use strategy::{AppendOutcome, ParseStrategyError, Strategy, StrategyKind};
