//! Repository discovery via the GitHub search API.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use diffharvest_config::SearchConfig;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{SearchError, SearchResult};

/// Default GitHub API root.
const GITHUB_API: &str = "https://api.github.com";

/// Search response from the GitHub API.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Repository in search results.
#[derive(Debug, Deserialize)]
struct SearchItem {
    html_url: String,
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// GitHub repository search client.
pub struct RepoSearch {
    client: reqwest::Client,
    api_root: String,
    token: Option<String>,
}

impl RepoSearch {
    /// Creates a new search client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> SearchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(SearchError::Client)?;

        Ok(Self {
            client,
            api_root: GITHUB_API.to_string(),
            token: None,
        })
    }

    /// Authenticates requests with a personal access token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Points the client at another API root, such as a GitHub Enterprise host.
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds the request for one result page.
    fn page_request(&self, params: &SearchConfig, page: u32) -> SearchResult<reqwest::Request> {
        let url = format!("{}/search/repositories", self.api_root);
        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", params.query.as_str()),
                ("sort", params.sort.as_str()),
                ("order", params.order.as_str()),
            ])
            .query(&[("per_page", params.per_page), ("page", page)]);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        builder
            .build()
            .map_err(|source| SearchError::Request { page, source })
    }

    /// Collects repository URLs page by page.
    ///
    /// Paging stops at the first empty page, at `max_pages`, or when the API
    /// answers with a non-success status. URLs collected before the stop are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be sent or a page cannot be
    /// decoded.
    pub async fn search(&self, params: &SearchConfig) -> SearchResult<Vec<String>> {
        let mut urls = Vec::new();
        let mut page = 1;

        loop {
            if params.max_pages.is_some_and(|max| page > max) {
                info!(page, "reached page limit");
                break;
            }

            let request = self.page_request(params, page)?;
            let response = self
                .client
                .execute(request)
                .await
                .map_err(|source| SearchError::Request { page, source })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(page, %status, message = %api_message(&body), "search stopped");
                break;
            }

            let data: SearchResponse = response
                .json()
                .await
                .map_err(|source| SearchError::Decode { page, source })?;

            if data.items.is_empty() {
                break;
            }

            info!(
                page,
                count = data.items.len(),
                total = data.total_count,
                "fetched search page"
            );
            urls.extend(data.items.into_iter().map(|item| item.html_url));
            page += 1;
        }

        Ok(urls)
    }
}

/// Extracts the `message` of an API error body, falling back to the raw body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Writes `urls` to `path`, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_url_list(path: impl AsRef<Path>, urls: &[String]) -> SearchResult<()> {
    let path = path.as_ref();
    let write_error = |source| SearchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for url in urls {
        writeln!(writer, "{url}").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    info!(?path, count = urls.len(), "wrote repository list");
    Ok(())
}
