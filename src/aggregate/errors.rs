//! Aggregation error types

use thiserror::Error;

/// Result type for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Errors raised while interpreting aggregation operations.
///
/// None of these are recovered locally: a malformed operation is an
/// operator error and aborts the whole run.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A union or join referenced a dataset that is not in the registry
    #[error("dataset '{0}' is not registered; operations may only reference datasets computed earlier")]
    MissingDataset(String),

    /// An operator outside the supported set was requested
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A filter clause could not be parsed
    #[error("invalid filter condition '{condition}': {reason}")]
    ConditionParse { condition: String, reason: String },
}

impl AggregateError {
    pub fn condition_parse(condition: impl Into<String>, reason: impl Into<String>) -> Self {
        AggregateError::ConditionParse {
            condition: condition.into(),
            reason: reason.into(),
        }
    }
}
