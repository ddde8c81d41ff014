//! Subcommand implementations.

pub mod clone;
pub mod extract;
pub mod init;
pub mod search;

use std::path::Path;

use anyhow::{Context, Result};
use diffharvest_config::{Config, find_and_load_config, load_config};
use tracing::debug;

/// Loads the explicit configuration file, or the nearest one.
///
/// Defaults apply when no file is given and none is found.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path).context("failed to load configuration");
    }

    let found = find_and_load_config().context("failed to load configuration")?;
    Ok(found.unwrap_or_else(|| {
        debug!("no configuration file found, using defaults");
        Config::default()
    }))
}
