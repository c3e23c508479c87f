//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the message and exits
//! non-zero.

use thiserror::Error;

use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;
use crate::pipeline::PipelineError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Top-level CLI error, aggregating the failures a command can hit.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}
