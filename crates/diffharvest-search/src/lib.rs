//! Repository search for Diffharvest.
//!
//! This crate handles:
//! - Paging through the GitHub repository search API
//! - Writing the collected repository URLs as a clone list

pub mod discovery;
pub mod error;

pub use discovery::{RepoSearch, write_url_list};
pub use error::{SearchError, SearchResult};
