//! Typed pipeline configuration
//!
//! The configuration declares named connections, an ordered list of source
//! queries, and an ordered list of aggregations. It is loaded and validated
//! up front; the rest of the pipeline only ever sees the typed form.

mod errors;
mod loader;
mod types;

pub use errors::{ConfigError, ConfigResult};
pub use loader::load;
pub use types::{
    AggregationConfig, AppConfig, BackendKind, ConnectionConfig, JoinCondition, OperationConfig,
    ParameterFormat, QueryConfig, QueryParameter, SelectColumn, SelectSide,
};
