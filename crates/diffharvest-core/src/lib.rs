//! Core library for Diffharvest.
//!
//! This crate provides the commit-mining pipeline: commit selection, diff
//! filtering, record building and the drivers that run them over a
//! directory of repository checkouts.

mod builder;
mod clone;
mod error;
mod filter;
mod language;
mod output;
mod pipeline;
mod selector;
mod text;

pub use builder::build_record;
pub use clone::{CloneSummary, clone_all, read_repo_list, repo_name_from_url};
pub use error::{CoreError, CoreResult};
pub use filter::{DiffFilter, DiffRejection};
pub use language::{Language, LanguageDetector, WhatlangDetector, detect_english};
pub use output::write_records;
pub use pipeline::{MinedRepository, Miner, RepoSummary, discover_repositories};
pub use selector::{CommitRejection, CommitSelector};
pub use text::{LINE_BREAK_TOKEN, clean_text, is_binary, is_printable, printable_ratio};
