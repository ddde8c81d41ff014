//! Clone command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use diffharvest_core::{clone_all, read_repo_list};

use super::resolve_config;

/// Arguments for the clone command.
#[derive(Debug, Args)]
pub struct CloneArgs {
    /// File listing repository URLs, one per line (default: github_repos.txt)
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Destination directory (default: repos)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,
}

/// Runs the clone command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CloneArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;

    let list = args
        .list
        .unwrap_or_else(|| PathBuf::from(&config.paths.repo_list));
    let dest = args
        .dest
        .unwrap_or_else(|| PathBuf::from(&config.paths.repos_dir));

    let urls = read_repo_list(&list).context("failed to read repository list")?;
    info!(count = urls.len(), list = %list.display(), "loaded repository list");

    let summary = clone_all(&urls, &dest)
        .with_context(|| format!("failed to prepare {}", dest.display()))?;

    println!(
        "Cloned {}, skipped {}, failed {}",
        summary.cloned, summary.skipped, summary.failed
    );

    Ok(())
}
