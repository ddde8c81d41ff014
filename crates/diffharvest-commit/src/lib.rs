//! Data types for Diffharvest.
//!
//! This crate provides the values that flow through the mining pipeline:
//! - [`Commit`]: A commit as read from Git history
//! - [`DiffEntry`]: One file-level change between a commit and its first parent
//! - [`Record`]: A cleaned, serializable change example

mod commit;
mod diff;
mod record;

pub use commit::Commit;
pub use diff::DiffEntry;
pub use record::{Record, RecordBuilder};
