//! Work generation
//!
//! A [`WorkGenerator`] yields `count` work items; item `i` targets
//! department `1 + (i mod D)` and carries the content `"Document {i}"`.
//! Every strategy consumes the same sequence so runs are comparable.

use crate::error::ConfigError;
use docseq_core::DepartmentId;
use std::iter::FusedIterator;

/// One append operation to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Position in the generator's sequence (0-based)
    pub index: usize,
    /// Target department
    pub department: DepartmentId,
    /// Document payload
    pub content: String,
}

/// Deterministic, restartable source of work items
#[derive(Debug, Clone)]
pub struct WorkGenerator {
    count: usize,
    department_count: u32,
    next: usize,
}

impl WorkGenerator {
    /// Create a generator of `count` items over `department_count` departments
    pub fn new(count: usize, department_count: u32) -> Result<Self, ConfigError> {
        if department_count == 0 {
            return Err(ConfigError::NoDepartments);
        }
        Ok(Self {
            count,
            department_count,
            next: 0,
        })
    }

    /// Rewind to the first item
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Total items this generator yields from the start
    pub fn total(&self) -> usize {
        self.count
    }

    /// Department targeted by item `index`
    pub fn department_for(index: usize, department_count: u32) -> DepartmentId {
        let d = department_count.max(1) as usize;
        DepartmentId(1 + (index % d) as u32)
    }

    /// Items routed to each department `1..=department_count` by one generator
    pub fn routed_counts(count: usize, department_count: u32) -> Vec<(DepartmentId, usize)> {
        let d = department_count as usize;
        (0..d)
            .map(|slot| {
                let routed = if d == 0 {
                    0
                } else {
                    count / d + usize::from(slot < count % d)
                };
                (DepartmentId(slot as u32 + 1), routed)
            })
            .collect()
    }
}

impl Iterator for WorkGenerator {
    type Item = WorkItem;

    fn next(&mut self) -> Option<WorkItem> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(WorkItem {
            index,
            department: Self::department_for(index, self.department_count),
            content: format!("Document {}", index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WorkGenerator {}

impl FusedIterator for WorkGenerator {}
