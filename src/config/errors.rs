//! Configuration error types

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a configuration.
///
/// All of these are fatal: a broken configuration is an operator error,
/// never a condition worth retrying.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("configuration file not found: {0}")]
    NotFound(String),

    /// Configuration file could not be read
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected shape
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration parsed but failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
