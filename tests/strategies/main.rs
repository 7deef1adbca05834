//! Strategy Integration Tests
//!
//! End-to-end runs of every strategy through the facade:
//! - sound strategies keep counters and references consistent under contention
//! - the uncoordinated baseline produces duplicate references
//! - reference formatting and per-department isolation
//! - optimistic conflicts converge through retry
//! - store failures stop workers instead of hanging the run
//!
//! ```bash
//! cargo test --test strategies
//! cargo test --test strategies baseline::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod baseline;
mod failures;
mod isolation;
mod optimistic;
mod references;
mod soundness;
