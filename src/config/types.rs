//! Configuration model
//!
//! JSON shape, with snake_case keys throughout:
//!
//! ```json
//! {
//!   "description": "monthly reconciliation",
//!   "connections": [
//!     {"name": "crm", "type": "postgres", "connection_string": "..."}
//!   ],
//!   "queries": [
//!     {"name": "employees", "data_source": "crm", "query_file": "employees.sql"}
//!   ],
//!   "aggregations": [
//!     {"name": "it_staff", "operations": [
//!       {"operation": "union", "query_names": ["employees"]},
//!       {"operation": "filter", "condition": "dept = IT"}
//!     ]}
//!   ]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Named data source connections
    pub connections: Vec<ConnectionConfig>,

    /// Source queries, in execution order
    pub queries: Vec<QueryConfig>,

    /// Derived datasets, computed after all queries, in declared order
    #[serde(default)]
    pub aggregations: Vec<AggregationConfig>,

    /// Checkpoint directory. Defaults to `results/` beside the
    /// configuration file when absent.
    #[serde(default)]
    pub results_dir: Option<PathBuf>,
}

/// One named backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub backend: BackendKind,

    pub connection_string: String,
}

/// Supported backend families.
///
/// The wire protocol itself lives outside this crate; the kind is carried
/// so embedders can pick the right [`crate::source::DataSourceClient`]
/// implementation per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Postgres,
    SqlServer,
}

/// One source query: name, owning connection, and the file holding its
/// query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub name: String,

    /// Name of the connection this query runs against
    pub data_source: String,

    /// Path to the file containing the query text
    pub query_file: PathBuf,

    /// Substitutions applied to the query text before execution
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

/// A placeholder substitution sourced from an upstream dataset.
///
/// The token `@<name>` in the query text is replaced by the rendered
/// values of `column` across the rows of `from_query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,

    /// Upstream dataset the values come from; must be declared earlier
    pub from_query: String,

    /// Column whose values are collected
    pub column: String,

    #[serde(default)]
    pub format: ParameterFormat,
}

/// Rendering applied to collected parameter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterFormat {
    /// Comma-joined literal list wrapped in parentheses: `(1,2,3)`
    #[default]
    InClause,
}

/// One derived dataset: a name and the ordered operations producing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub name: String,
    pub operations: Vec<OperationConfig>,
}

/// One step of an aggregation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationConfig {
    /// Concatenates the named datasets, in declared order
    Union { query_names: Vec<String> },

    /// Keeps rows of the running set matching a single
    /// `column operator value` clause; a blank condition is the identity
    Filter { condition: String },

    /// Equality join of two named datasets, dropping unmatched left rows
    InnerJoin {
        left: String,
        right: String,
        join_conditions: Vec<JoinCondition>,
        select_columns: Vec<SelectColumn>,
    },

    /// Equality join of two named datasets, emitting one null-padded row
    /// per unmatched left row
    LeftJoin {
        left: String,
        right: String,
        join_conditions: Vec<JoinCondition>,
        select_columns: Vec<SelectColumn>,
    },
}

/// An equality predicate between a left-side and right-side column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left_column: String,
    pub right_column: String,

    /// Only `=` is supported; anything else fails at join time
    #[serde(default = "default_join_operator")]
    pub operator: String,
}

fn default_join_operator() -> String {
    "=".to_string()
}

/// A projection directive choosing one output column from either join side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectColumn {
    pub side: SelectSide,
    pub column: String,
}

/// Which join operand a projected column is pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectSide {
    Left,
    Right,
}

impl AppConfig {
    /// All dataset names this configuration will register, queries first,
    /// in declaration order.
    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.queries
            .iter()
            .map(|q| q.name.as_str())
            .chain(self.aggregations.iter().map(|a| a.name.as_str()))
    }
}
