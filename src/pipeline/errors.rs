//! Pipeline error types
//!
//! Every variant names the dataset whose resolution failed, so a run
//! aborts with enough context to find the offending configuration entry.

use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::checkpoint::CheckpointError;
use crate::source::SourceError;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An aggregation operation failed
    #[error("aggregation '{dataset}' failed: {source}")]
    Aggregation {
        dataset: String,
        #[source]
        source: AggregateError,
    },

    /// A query could not be executed against its data source
    #[error("query '{dataset}' failed: {source}")]
    Source {
        dataset: String,
        #[source]
        source: SourceError,
    },

    /// Checkpoint I/O failed for a dataset
    #[error("checkpoint for '{dataset}' failed: {source}")]
    Checkpoint {
        dataset: String,
        #[source]
        source: CheckpointError,
    },

    /// A query's text file could not be read
    #[error("failed to read query file {path} for '{dataset}': {source}")]
    QueryFile {
        dataset: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A parameter referenced a dataset that is not registered yet
    #[error("query '{dataset}' parameter '{parameter}' references unregistered dataset '{missing}'")]
    MissingParameterSource {
        dataset: String,
        parameter: String,
        missing: String,
    },

    /// A dataset name was registered twice within one run. Registry
    /// entries are write-once; a second write is a logic error.
    #[error("dataset '{0}' is already registered; registry entries are write-once")]
    DatasetAlreadyRegistered(String),
}
