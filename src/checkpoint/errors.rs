//! Checkpoint error types

use thiserror::Error;

/// Result type for checkpoint operations
pub type CheckpointResult<T> = Result<T, CheckpointError>;

/// I/O failures on checkpoint files.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("failed to create results directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read checkpoint {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write checkpoint {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
