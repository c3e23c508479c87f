//! Query parameter substitution
//!
//! Each declared parameter collects one column's values from an upstream
//! dataset, renders them as a literal list, and textually replaces the
//! `@<name>` placeholder in the query text. The upstream dataset must
//! already be registered, which the declaration order guarantees for a
//! valid configuration.

use crate::config::{ParameterFormat, QueryConfig};
use crate::table::Value;

use super::errors::{PipelineError, PipelineResult};
use super::registry::Registry;

/// Applies all of `query`'s parameter substitutions to `query_text`.
pub fn substitute(
    query_text: &str,
    query: &QueryConfig,
    registry: &Registry,
) -> PipelineResult<String> {
    let mut text = query_text.to_string();

    for param in &query.parameters {
        let rows = registry.get(&param.from_query).ok_or_else(|| {
            PipelineError::MissingParameterSource {
                dataset: query.name.clone(),
                parameter: param.name.clone(),
                missing: param.from_query.clone(),
            }
        })?;

        // Rows without the column are skipped; null renders as empty
        let values: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get(&param.column))
            .map(Value::render)
            .collect();

        match param.format {
            ParameterFormat::InClause => {
                let clause = format!("({})", values.join(","));
                text = text.replace(&format!("@{}", param.name), &clause);
            }
        }
    }

    Ok(text)
}
