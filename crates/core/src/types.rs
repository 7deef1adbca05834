//! Core types for document sequencing
//!
//! This module defines the fundamental types used throughout the system:
//! - [`DepartmentId`]: Stable identifier of a department row
//! - [`Department`]: Committed state of a department (counter + version token)
//! - [`Reference`]: Derived `{code}/{serial}/{year}` document reference
//! - [`Document`]: An appended document row

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a department row
///
/// Department ids are small positive integers assigned when the store is
/// seeded. Work items target departments `1..=D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub u32);

impl DepartmentId {
    /// Create a new DepartmentId
    ///
    /// # Examples
    ///
    /// ```
    /// use docseq_core::types::DepartmentId;
    ///
    /// let id = DepartmentId::new(2);
    /// assert_eq!(id.get(), 2);
    /// ```
    pub const fn new(id: u32) -> Self {
        DepartmentId(id)
    }

    /// Get the raw id
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DepartmentId {
    fn from(id: u32) -> Self {
        DepartmentId(id)
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Committed state of a department row
///
/// `serial_num` is the sequence number the *next* reference will carry.
/// `version` is bumped by every optimistic update and acts as a
/// compare-and-swap token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Row id
    pub id: DepartmentId,
    /// Short prefix used to build references
    pub code: String,
    /// Next serial to hand out
    pub serial_num: u64,
    /// Optimistic concurrency token
    pub version: u64,
}

impl Department {
    /// Create a department row
    pub fn new(id: impl Into<DepartmentId>, code: impl Into<String>, serial_num: u64) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            serial_num,
            version: 0,
        }
    }

    /// Set the version token
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

/// Department columns returned by a read inside a transaction
///
/// This is what the read boundary yields; a missing row is `None` at the
/// call site rather than a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    /// Serial number as read (pre-increment)
    pub serial_num: u64,
    /// Department code
    pub code: String,
    /// Version token as read
    pub version: u64,
}

/// Document reference: `{code}/{serial}/{year}`
///
/// # Examples
///
/// ```
/// use docseq_core::types::Reference;
///
/// let r = Reference::new("C", 5, 2024);
/// assert_eq!(r.as_str(), "C/5/2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Build a reference from its parts
    pub fn new(code: &str, serial_num: u64, year: i32) -> Self {
        Reference(format!("{}/{}/{}", code, serial_num, year))
    }

    /// Build a reference stamped with the current calendar year
    pub fn for_current_year(code: &str, serial_num: u64) -> Self {
        Self::new(code, serial_num, current_year())
    }

    /// Borrow the reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current local calendar year
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Document row as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Owning department
    pub department_id: DepartmentId,
    /// Derived reference
    pub reference: Reference,
    /// Opaque payload
    pub content: String,
}

/// Document to be inserted by a transaction
pub type NewDocument = Document;
