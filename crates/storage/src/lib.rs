//! Storage layer for docseq
//!
//! This crate implements the store the strategies run against:
//! - MemoryStore: department/document tables with buffered, atomically
//!   committed transactions
//! - RowLocks: per-row exclusive locks for `FOR UPDATE` reads and updates
//! - StoreConfig: seeding, initial serial, simulated statement latency

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod locks;
pub mod memory;

pub use config::{DepartmentSeed, StoreConfig};
pub use locks::RowLocks;
pub use memory::{MemoryStore, MemoryTransaction};
