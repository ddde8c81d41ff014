//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Commit selection settings.
    #[serde(default)]
    pub selector: SelectorConfig,

    /// Diff filter settings.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Repository search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Checks that the values are usable together.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending value.
    pub fn validate(&self) -> Result<(), String> {
        if self.selector.min_words > self.selector.max_words {
            return Err(format!(
                "selector.min_words ({}) exceeds selector.max_words ({})",
                self.selector.min_words, self.selector.max_words
            ));
        }
        if !(0.0..=1.0).contains(&self.filter.min_printable_ratio) {
            return Err(format!(
                "filter.min_printable_ratio must be within 0.0..=1.0, got {}",
                self.filter.min_printable_ratio
            ));
        }
        if self.filter.extensions.is_empty() {
            return Err("filter.extensions must not be empty".to_string());
        }
        if !(1..=100).contains(&self.search.per_page) {
            return Err(format!(
                "search.per_page must be within 1..=100, got {}",
                self.search.per_page
            ));
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the local repository checkouts.
    #[serde(default = "default_repos_dir")]
    pub repos_dir: String,

    /// Output file for extracted records.
    #[serde(default = "default_output")]
    pub output: String,

    /// Text file listing repository URLs, one per line.
    #[serde(default = "default_repo_list")]
    pub repo_list: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            repos_dir: default_repos_dir(),
            output: default_output(),
            repo_list: default_repo_list(),
        }
    }
}

fn default_repos_dir() -> String {
    "repos".to_string()
}

fn default_output() -> String {
    "repo_commit_data.json".to_string()
}

fn default_repo_list() -> String {
    "github_repos.txt".to_string()
}

/// Commit selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Maximum number of commits sampled per repository.
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Minimum number of words in an accepted commit message.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Maximum number of words in an accepted commit message.
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Seed for reproducible sampling.
    pub seed: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_commits: default_max_commits(),
            min_words: default_min_words(),
            max_words: default_max_words(),
            seed: None,
        }
    }
}

fn default_max_commits() -> usize {
    50
}

fn default_min_words() -> usize {
    5
}

fn default_max_words() -> usize {
    150
}

/// Diff filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Maximum number of newline characters in a diff body.
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,

    /// Accepted file extensions, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Minimum printable-character ratio of the sampled text.
    #[serde(default = "default_min_printable_ratio")]
    pub min_printable_ratio: f64,

    /// Number of leading characters sampled from each text for the binary check.
    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_diff_lines: default_max_diff_lines(),
            extensions: default_extensions(),
            min_printable_ratio: default_min_printable_ratio(),
            sample_chars: default_sample_chars(),
        }
    }
}

fn default_max_diff_lines() -> usize {
    20
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string(), "txt".to_string(), "yml".to_string()]
}

fn default_min_printable_ratio() -> f64 {
    0.9
}

fn default_sample_chars() -> usize {
    500
}

/// Repository search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search query in GitHub search syntax.
    #[serde(default = "default_query")]
    pub query: String,

    /// Sort field.
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Sort order (`asc` or `desc`).
    #[serde(default = "default_order")]
    pub order: String,

    /// Results per page (at most 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Stop after this many pages.
    pub max_pages: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            sort: default_sort(),
            order: default_order(),
            per_page: default_per_page(),
            max_pages: None,
        }
    }
}

fn default_query() -> String {
    "stars:>20000 language:Python size:<300000".to_string()
}

fn default_sort() -> String {
    "stars".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

fn default_per_page() -> u32 {
    100
}
