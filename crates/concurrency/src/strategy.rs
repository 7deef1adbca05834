//! Strategy selection
//!
//! [`StrategyKind`] is the closed set of strategies a run can be configured
//! with. [`Strategy`] is the runtime value built from it; the
//! application-lock variant carries the [`ApplicationLock`] handle that all
//! workers of a run share.

use crate::application_lock::ApplicationLock;
use crate::{optimistic, row_lock, uncoordinated};
use docseq_core::{AppendError, DepartmentId, Reference, Store};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result of one append attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Document inserted and counter advanced
    Committed(Reference),
    /// Optimistic update lost a race; nothing was written, retry the operation
    Conflict,
}

impl AppendOutcome {
    /// Whether the attempt must be retried
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppendOutcome::Conflict)
    }
}

/// Configurable strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// No coordination (race-prone baseline)
    Uncoordinated,
    /// One process-wide critical section
    ApplicationLock,
    /// `SELECT ... FOR UPDATE` row locking
    RowLock,
    /// Version-guarded conditional update with caller retry
    Optimistic,
}

impl StrategyKind {
    /// All strategies, baseline first
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Uncoordinated,
        StrategyKind::ApplicationLock,
        StrategyKind::RowLock,
        StrategyKind::Optimistic,
    ];

    /// Stable name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Uncoordinated => "uncoordinated",
            StrategyKind::ApplicationLock => "application-lock",
            StrategyKind::RowLock => "row-lock",
            StrategyKind::Optimistic => "optimistic",
        }
    }

    /// Whether the strategy guarantees unique references under concurrency
    pub fn is_sound(&self) -> bool {
        !matches!(self, StrategyKind::Uncoordinated)
    }

    /// Whether attempts can end in [`AppendOutcome::Conflict`]
    pub fn may_conflict(&self) -> bool {
        matches!(self, StrategyKind::Optimistic)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected one of: uncoordinated, application-lock, row-lock, optimistic)")]
pub struct ParseStrategyError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "uncoordinated" | "none" => Ok(StrategyKind::Uncoordinated),
            "application-lock" | "mutex" => Ok(StrategyKind::ApplicationLock),
            "row-lock" | "for-update" => Ok(StrategyKind::RowLock),
            "optimistic" | "occ" => Ok(StrategyKind::Optimistic),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// A strategy ready to run
///
/// Clone it into each worker; clones of the application-lock variant share
/// one critical section.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// See [`uncoordinated`]
    Uncoordinated,
    /// See [`crate::application_lock`]
    ApplicationLock(ApplicationLock),
    /// See [`row_lock`]
    RowLock,
    /// See [`optimistic`]
    Optimistic,
}

impl Strategy {
    /// Build a strategy, creating a fresh lock handle where one is needed
    pub fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Uncoordinated => Strategy::Uncoordinated,
            StrategyKind::ApplicationLock => Strategy::ApplicationLock(ApplicationLock::new()),
            StrategyKind::RowLock => Strategy::RowLock,
            StrategyKind::Optimistic => Strategy::Optimistic,
        }
    }

    /// Which strategy this is
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Uncoordinated => StrategyKind::Uncoordinated,
            Strategy::ApplicationLock(_) => StrategyKind::ApplicationLock,
            Strategy::RowLock => StrategyKind::RowLock,
            Strategy::Optimistic => StrategyKind::Optimistic,
        }
    }

    /// Make one append attempt
    ///
    /// Never retries; see [`append_with_retry`](crate::retry::append_with_retry).
    pub fn append<S: Store>(
        &self,
        store: &S,
        department: DepartmentId,
        content: &str,
    ) -> Result<AppendOutcome, AppendError> {
        match self {
            Strategy::Uncoordinated => uncoordinated::append(store, department, content),
            Strategy::ApplicationLock(lock) => lock.append(store, department, content),
            Strategy::RowLock => row_lock::append(store, department, content),
            Strategy::Optimistic => optimistic::append(store, department, content),
        }
    }
}

impl From<StrategyKind> for Strategy {
    fn from(kind: StrategyKind) -> Self {
        Strategy::new(kind)
    }
}
