//! Error types for repository search.

use std::path::PathBuf;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search error types.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request for a result page failed.
    #[error("failed to fetch search page {page}")]
    Request {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    /// A result page could not be decoded.
    #[error("failed to decode search page {page}")]
    Decode {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to write the URL list.
    #[error("failed to write URL list to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
