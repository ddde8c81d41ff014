//! Search command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use diffharvest_search::{RepoSearch, write_url_list};

use super::resolve_config;

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query in GitHub search syntax
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output URL list (default: github_repos.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after this many result pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// GitHub token used to raise the rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Runs the search command.
pub fn run(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    // Create a tokio runtime for async operations
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    rt.block_on(async { run_async(args, config_path).await })
}

async fn run_async(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = resolve_config(config_path)?;

    if let Some(query) = args.query {
        config.search.query = query;
    }
    if args.max_pages.is_some() {
        config.search.max_pages = args.max_pages;
    }
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.paths.repo_list));

    println!("Searching GitHub for: {}", config.search.query);

    let search = RepoSearch::new()
        .context("failed to initialize search client")?
        .with_token(args.token);
    let urls = search
        .search(&config.search)
        .await
        .context("repository search failed")?;

    write_url_list(&output, &urls)?;

    println!("Wrote {} repositories to {}", urls.len(), output.display());

    Ok(())
}
