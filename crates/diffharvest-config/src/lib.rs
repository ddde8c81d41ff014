//! Configuration management for Diffharvest.
//!
//! This crate handles loading and validating the `diffharvest.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, find_config_file,
    load_config,
};
pub use schema::{Config, FilterConfig, PathsConfig, SearchConfig, SelectorConfig};
