//! Core types and the store contract for document sequencing
//!
//! This crate defines:
//! - Domain types: [`DepartmentId`], [`Department`], [`Document`], [`Reference`]
//! - The error taxonomy: [`StoreError`], [`AppendError`]
//! - The [`Store`] / [`Transaction`] traits every strategy is written against

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppendError, StoreError, StoreResult};
pub use traits::{ReadMode, Store, Transaction};
pub use types::{
    current_year, Department, DepartmentId, DepartmentRow, Document, NewDocument, Reference,
};
