//! Store configuration
//!
//! Controls which department rows are seeded, the serial number a reset
//! restores, and an optional per-statement latency that models the
//! client/server round trip of a networked store.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Codes given to the first seeded departments
const DEFAULT_CODES: [&str; 3] = ["ACC", "HR", "OPS"];

/// A department row to seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSeed {
    /// Row id
    pub id: u32,
    /// Reference prefix
    pub code: String,
}

impl DepartmentSeed {
    /// Create a seed entry
    pub fn new(id: u32, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }
}

/// Configuration for [`MemoryStore`](crate::MemoryStore)
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new()
///     .with_department_count(2)
///     .with_statement_latency(Duration::from_millis(1));
/// let store = MemoryStore::with_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Department rows created at startup
    pub departments: Vec<DepartmentSeed>,
    /// Serial number every department starts at (and returns to on reset)
    pub initial_serial: u64,
    /// Simulated round-trip latency per statement, in microseconds
    pub statement_latency_us: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            departments: seeds_for(DEFAULT_CODES.len() as u32),
            initial_serial: 1,
            statement_latency_us: 0,
        }
    }
}

impl StoreConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed departments `1..=count`
    ///
    /// The first three get the codes `ACC`, `HR`, `OPS`; later ones `D{id}`.
    pub fn with_department_count(mut self, count: u32) -> Self {
        self.departments = seeds_for(count);
        self
    }

    /// Seed exactly these departments
    pub fn with_departments(mut self, departments: Vec<DepartmentSeed>) -> Self {
        self.departments = departments;
        self
    }

    /// Set the initial serial number
    pub fn with_initial_serial(mut self, initial_serial: u64) -> Self {
        self.initial_serial = initial_serial;
        self
    }

    /// Set the simulated per-statement latency
    pub fn with_statement_latency(mut self, latency: Duration) -> Self {
        self.statement_latency_us = latency.as_micros().min(u64::MAX as u128) as u64;
        self
    }

    /// Per-statement latency as a Duration
    pub fn statement_latency(&self) -> Duration {
        Duration::from_micros(self.statement_latency_us)
    }
}

fn seeds_for(count: u32) -> Vec<DepartmentSeed> {
    (1..=count)
        .map(|id| {
            let code = DEFAULT_CODES
                .get(id as usize - 1)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("D{}", id));
            DepartmentSeed::new(id, code)
        })
        .collect()
}
