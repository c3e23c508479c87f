//! Data source error types

use thiserror::Error;

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Failures at the data source boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend failed to execute a query. Carries the backend's own
    /// description; the pipeline adds the dataset context.
    #[error("query execution failed: {0}")]
    QueryFailed(String),

    /// No client is bound for a configured connection name
    #[error("no client bound for data source '{0}'")]
    ClientNotBound(String),
}
