//! Git abstraction layer for Diffharvest.
//!
//! This crate provides Git operations:
//! - Repository opening and cloning
//! - Commit enumeration from HEAD
//! - First-parent file diffs with blob contents

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::{Repository, decode_utf8_lossy};
