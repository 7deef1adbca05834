//! Caller-side retry for optimistic appends
//!
//! An optimistic attempt that loses a race must be retried, otherwise the
//! work item is silently dropped. [`append_with_retry`] retries the whole
//! operation on [`AppendOutcome::Conflict`] and turns an exhausted budget
//! into [`AppendError::RetriesExhausted`]. `NotFound` and store errors are
//! returned immediately.

use crate::strategy::{AppendOutcome, Strategy};
use docseq_core::{AppendError, DepartmentId, Reference, Store};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{trace, warn};

/// Configuration for conflict retry behavior
///
/// # Example
/// ```ignore
/// let config = RetryConfig::new()
///     .with_max_retries(50)
///     .with_base_delay_ms(1)
///     .with_max_delay_ms(20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt (0 = no retries)
    pub max_retries: usize,
    /// Base delay between retries in milliseconds (0 = retry immediately)
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1_000,
            base_delay_ms: 0,
            max_delay_ms: 50,
        }
    }
}

impl RetryConfig {
    /// Create a new RetryConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RetryConfig with no retries
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Retry until the operation commits
    pub fn unbounded() -> Self {
        Self {
            max_retries: usize::MAX,
            ..Default::default()
        }
    }

    /// Set maximum number of retries
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set base delay for exponential backoff
    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    /// Set maximum delay between retries
    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Delay before retry number `attempt` (0-based), exponential backoff
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        // Cap the shift to prevent overflow (1 << 63 is the max for u64)
        let shift = attempt.min(63) as u32;
        let multiplier = 1u64 << shift;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier);
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }
}

/// A committed append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// Reference of the inserted document
    pub reference: Reference,
    /// Attempts made, including the successful one
    pub attempts: usize,
}

impl Committed {
    /// Conflicts that were retried before committing
    pub fn conflicts(&self) -> usize {
        self.attempts - 1
    }
}

/// Append a document, retrying the whole operation on conflict
///
/// Strategies that never conflict commit on the first attempt.
pub fn append_with_retry<S: Store>(
    strategy: &Strategy,
    store: &S,
    department: DepartmentId,
    content: &str,
    config: &RetryConfig,
) -> Result<Committed, AppendError> {
    let mut retries = 0usize;
    loop {
        match strategy.append(store, department, content)? {
            AppendOutcome::Committed(reference) => {
                return Ok(Committed {
                    reference,
                    attempts: retries.saturating_add(1),
                });
            }
            AppendOutcome::Conflict => {
                if retries >= config.max_retries {
                    let attempts = retries.saturating_add(1);
                    warn!(%department, attempts, "retry budget exhausted");
                    return Err(AppendError::RetriesExhausted {
                        department,
                        attempts,
                    });
                }
                let delay = config.calculate_delay(retries);
                trace!(%department, retry = retries + 1, ?delay, "retrying after conflict");
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                retries += 1;
            }
        }
    }
}
