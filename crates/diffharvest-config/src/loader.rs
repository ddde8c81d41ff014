//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "diffharvest.toml";

/// Loads and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns an error carrying `path` if the file cannot be read, parsed or
/// validated.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|reason| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(?path, "loaded configuration");
    Ok(config)
}

/// Returns the nearest configuration file in `start_dir` or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    start_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Loads the nearest configuration file above the current directory.
///
/// Returns `Ok(None)` when there is no configuration file.
///
/// # Errors
///
/// Returns an error if the current directory is unavailable or the file
/// found cannot be loaded.
pub fn find_and_load_config() -> ConfigResult<Option<Config>> {
    let current_dir = std::env::current_dir().map_err(|source| ConfigError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    find_and_load_config_from(current_dir)
}

/// Loads the nearest configuration file above `start_dir`.
///
/// Returns `Ok(None)` when there is no configuration file.
///
/// # Errors
///
/// Returns an error if the file found cannot be loaded.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Option<Config>> {
    find_config_file(start_dir).map(load_config).transpose()
}
