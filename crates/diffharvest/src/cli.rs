//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Mine small, cleaned commit-diff examples from local Git repositories.
#[derive(Debug, Parser)]
#[command(name = "diffharvest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: nearest diffharvest.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract commit-diff records from a directory of checkouts
    Extract(commands::extract::ExtractArgs),

    /// Clone every repository in a URL list
    Clone(commands::clone::CloneArgs),

    /// Search GitHub for repositories and write a URL list
    Search(commands::search::SearchArgs),

    /// Write a default diffharvest.toml
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Extract(args) => commands::extract::run(args, config),
            Commands::Clone(args) => commands::clone::run(args, config),
            Commands::Search(args) => commands::search::run(args, config),
            Commands::Init(args) => commands::init::run(&args),
        }
    }
}
