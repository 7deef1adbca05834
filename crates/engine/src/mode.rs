//! Run modes
//!
//! The five canned experiments an operator picks from: one sequential
//! baseline and four parallel runs, one per strategy.

use crate::harness::HarnessConfig;
use docseq_concurrency::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Departments every mode routes work over
pub const MODE_DEPARTMENTS: u32 = 3;

/// A canned harness configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// One worker, 50 operations, no coordination
    Sequential,
    /// 10 workers × 5 operations, no coordination
    Parallel,
    /// 10 workers × 5 operations behind one process-wide mutex
    ApplicationLock,
    /// 10 workers × 5 operations with `FOR UPDATE` row locks
    RowLock,
    /// 10 workers × 5 operations with version CAS and retry
    Optimistic,
}

impl RunMode {
    /// All modes in menu order
    pub const ALL: [RunMode; 5] = [
        RunMode::Sequential,
        RunMode::Parallel,
        RunMode::ApplicationLock,
        RunMode::RowLock,
        RunMode::Optimistic,
    ];

    /// 1-based menu number
    pub fn number(&self) -> usize {
        match self {
            RunMode::Sequential => 1,
            RunMode::Parallel => 2,
            RunMode::ApplicationLock => 3,
            RunMode::RowLock => 4,
            RunMode::Optimistic => 5,
        }
    }

    /// Stable name
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Sequential => "sequential",
            RunMode::Parallel => "parallel",
            RunMode::ApplicationLock => "application-lock",
            RunMode::RowLock => "row-lock",
            RunMode::Optimistic => "optimistic",
        }
    }

    /// Menu label, e.g. `3. application-lock`
    pub fn label(&self) -> String {
        format!("{}. {}", self.number(), self.name())
    }

    /// One-line description for menus
    pub fn description(&self) -> &'static str {
        match self {
            RunMode::Sequential => "single worker baseline, no coordination",
            RunMode::Parallel => "parallel baseline, no coordination (expect duplicates)",
            RunMode::ApplicationLock => "parallel, process-wide mutex around each append",
            RunMode::RowLock => "parallel, exclusive row lock on the department",
            RunMode::Optimistic => "parallel, version compare-and-swap with retry",
        }
    }

    /// Strategy the mode runs
    pub fn strategy(&self) -> StrategyKind {
        match self {
            RunMode::Sequential | RunMode::Parallel => StrategyKind::Uncoordinated,
            RunMode::ApplicationLock => StrategyKind::ApplicationLock,
            RunMode::RowLock => StrategyKind::RowLock,
            RunMode::Optimistic => StrategyKind::Optimistic,
        }
    }

    /// Harness configuration for this mode
    pub fn config(&self) -> HarnessConfig {
        let (workers, per_worker) = match self {
            RunMode::Sequential => (1, 50),
            _ => (10, 5),
        };
        HarnessConfig::new(self.strategy())
            .with_workers(workers)
            .with_per_worker(per_worker)
            .with_departments(MODE_DEPARTMENTS)
    }

    /// Resolve operator input to a mode
    ///
    /// Accepts a prefix of the menu label (`"3"`, `"3. app"`) or of the
    /// name (`"row"`). The first match in menu order wins; blank input
    /// matches nothing.
    pub fn resolve(input: &str) -> Option<RunMode> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().starts_with(&input) || mode.name().starts_with(&input))
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input that names no run mode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown run mode '{0}'")]
pub struct ParseModeError(pub String);

impl FromStr for RunMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunMode::resolve(s).ok_or_else(|| ParseModeError(s.to_string()))
    }
}
