//! Configuration loading and validation
//!
//! Reads the JSON configuration file, deserializes it into the typed
//! model, and validates cross-references before anything executes. A
//! missing or malformed configuration is fatal.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::errors::{ConfigError, ConfigResult};
use super::types::AppConfig;

/// Loads and validates a configuration file.
pub fn load(path: &Path) -> ConfigResult<AppConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: AppConfig = serde_json::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Validates a parsed configuration.
///
/// Checks, in order:
/// - at least one connection and at least one query are declared
/// - connection names are unique
/// - dataset names (queries and aggregations together) are unique
/// - every query references a declared connection
/// - every query parameter references a dataset declared earlier
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    if config.connections.is_empty() {
        return Err(ConfigError::Invalid(
            "no connections are declared".to_string(),
        ));
    }

    if config.queries.is_empty() {
        return Err(ConfigError::Invalid("no queries are declared".to_string()));
    }

    let mut connection_names = HashSet::new();
    for conn in &config.connections {
        if !connection_names.insert(conn.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate connection name '{}'",
                conn.name
            )));
        }
    }

    let mut dataset_names = HashSet::new();
    for name in config.dataset_names() {
        if !dataset_names.insert(name) {
            return Err(ConfigError::Invalid(format!(
                "duplicate dataset name '{}'",
                name
            )));
        }
    }

    let mut earlier: HashSet<&str> = HashSet::new();
    for query in &config.queries {
        if !connection_names.contains(query.data_source.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "query '{}' references unknown connection '{}'",
                query.name, query.data_source
            )));
        }

        for param in &query.parameters {
            if !earlier.contains(param.from_query.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "query '{}' parameter '{}' references dataset '{}' that is not declared earlier",
                    query.name, param.name, param.from_query
                )));
            }
        }

        earlier.insert(query.name.as_str());
    }

    Ok(())
}
