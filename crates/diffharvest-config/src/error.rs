//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the schema.
    #[error("invalid TOML in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    /// The configuration could not be rendered as TOML.
    #[error("failed to render configuration")]
    Render(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_display() {
        let err = ConfigError::Read {
            path: PathBuf::from("/path/to/diffharvest.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read /path/to/diffharvest.toml");
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid {
            path: PathBuf::from("diffharvest.toml"),
            reason: "filter.extensions must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration in diffharvest.toml: filter.extensions must not be empty"
        );
    }
}
