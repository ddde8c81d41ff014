//! Extract command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use diffharvest_core::{Miner, write_records};

use super::resolve_config;

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Directory of repository checkouts (default: repos)
    #[arg(short, long)]
    pub repos: Option<PathBuf>,

    /// Output JSON file (default: repo_commit_data.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum commits sampled per repository
    #[arg(short = 'n', long)]
    pub max_commits: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Runs the extract command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ExtractArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = resolve_config(config_path)?;

    if let Some(max_commits) = args.max_commits {
        config.selector.max_commits = max_commits;
    }
    if args.seed.is_some() {
        config.selector.seed = args.seed;
    }

    let repos_dir = args
        .repos
        .unwrap_or_else(|| PathBuf::from(&config.paths.repos_dir));
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.paths.output));

    if !repos_dir.is_dir() {
        bail!("repository directory {} does not exist", repos_dir.display());
    }

    info!(repos = %repos_dir.display(), "extracting commit data");

    let mut miner = Miner::new(&config);
    let records = miner
        .mine_directory(&repos_dir)
        .context("failed to mine repositories")?;

    write_records(&output, &records).context("failed to write records")?;

    println!(
        "Wrote {} records to {}",
        records.len(),
        output.display()
    );

    Ok(())
}
