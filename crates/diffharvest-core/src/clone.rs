//! Bulk cloning of repository lists.

use std::path::Path;

use diffharvest_git::Repository;
use tracing::{error, info};

use crate::{CoreError, CoreResult};

/// Outcome counts of a bulk clone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneSummary {
    /// Repositories cloned by this run.
    pub cloned: usize,
    /// Repositories already present in the destination.
    pub skipped: usize,
    /// Repositories that failed to clone.
    pub failed: usize,
}

/// Reads a repository list, one URL per line. Blank lines are ignored.
///
/// # Errors
///
/// Returns [`CoreError::ReadInput`] if the file cannot be read.
pub fn read_repo_list(path: impl AsRef<Path>) -> CoreResult<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Returns the directory name a repository URL clones into.
#[must_use]
pub fn repo_name_from_url(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    let name = url.rsplit(['/', '\\']).next().unwrap_or(url);
    name.strip_suffix(".git").unwrap_or(name)
}

/// Clones every URL in `urls` into `dest`, skipping existing checkouts.
///
/// A failed clone is logged and does not stop the run.
///
/// # Errors
///
/// Returns an error if `dest` cannot be created.
pub fn clone_all(urls: &[String], dest: impl AsRef<Path>) -> CoreResult<CloneSummary> {
    let dest = dest.as_ref();
    std::fs::create_dir_all(dest)?;

    let mut summary = CloneSummary::default();
    for url in urls {
        let name = repo_name_from_url(url);
        if name.is_empty() {
            error!(url = %url, "cannot derive a directory name");
            summary.failed += 1;
            continue;
        }

        let target = dest.join(name);
        if target.exists() {
            info!(url = %url, ?target, "already cloned, skipping");
            summary.skipped += 1;
            continue;
        }

        info!(url = %url, ?target, "cloning");
        match Repository::clone_from(url, &target) {
            Ok(_) => summary.cloned += 1,
            Err(e) => {
                error!(url = %url, error = %e, "clone failed");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
