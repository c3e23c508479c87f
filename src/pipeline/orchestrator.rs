//! End-to-end pipeline driver
//!
//! Resolution order is strict: all queries in declared order, then all
//! aggregations in declared order. For each dataset the checkpoint is
//! consulted first; only a missing checkpoint triggers computation. The
//! result is registered exactly once and checkpointed before the next
//! step, so a rerun against the same results directory performs no data
//! source calls and no recomputation.

use std::fs;

use crate::aggregate::Aggregator;
use crate::checkpoint::CheckpointStore;
use crate::config::{AggregationConfig, AppConfig, QueryConfig};
use crate::observability::{Logger, Severity};
use crate::source::{ClientRegistry, SourceError};
use crate::table::RowSet;

use super::errors::{PipelineError, PipelineResult};
use super::params;
use super::registry::Registry;

/// Drives one pipeline run.
pub struct Orchestrator<'a> {
    config: &'a AppConfig,
    clients: &'a ClientRegistry,
    store: CheckpointStore,
    registry: Registry,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a AppConfig, clients: &'a ClientRegistry, store: CheckpointStore) -> Self {
        Self {
            config,
            clients,
            store,
            registry: Registry::new(),
        }
    }

    /// Runs the whole pipeline and returns the populated registry.
    ///
    /// Any error aborts the run; no partial checkpoint is left behind
    /// (saves are atomic) and already-written checkpoints remain valid
    /// resume points.
    pub fn run(mut self) -> PipelineResult<Registry> {
        for query in &self.config.queries {
            self.resolve_query(query)?;
        }

        for aggregation in &self.config.aggregations {
            self.resolve_aggregation(aggregation)?;
        }

        Logger::log(
            Severity::Info,
            "pipeline_completed",
            &[("datasets", &self.registry.len().to_string())],
        );

        Ok(self.registry)
    }

    /// Resolves one query: from checkpoint if present, otherwise by
    /// substituting parameters and executing against its data source.
    fn resolve_query(&mut self, query: &QueryConfig) -> PipelineResult<()> {
        if self.store.exists(&query.name) {
            let rows = self.load_checkpoint(&query.name)?;
            Logger::log(
                Severity::Info,
                "checkpoint_loaded",
                &[("dataset", &query.name), ("rows", &rows.len().to_string())],
            );
            return self.registry.insert(&query.name, rows);
        }

        let query_text =
            fs::read_to_string(&query.query_file).map_err(|e| PipelineError::QueryFile {
                dataset: query.name.clone(),
                path: query.query_file.display().to_string(),
                source: e,
            })?;

        let query_text = params::substitute(&query_text, query, &self.registry)?;

        let client = self.clients.get(&query.data_source).ok_or_else(|| {
            PipelineError::Source {
                dataset: query.name.clone(),
                source: SourceError::ClientNotBound(query.data_source.clone()),
            }
        })?;

        let rows = client
            .execute_query(&query_text)
            .map_err(|e| PipelineError::Source {
                dataset: query.name.clone(),
                source: e,
            })?;

        Logger::log(
            Severity::Info,
            "query_executed",
            &[
                ("dataset", &query.name),
                ("data_source", &query.data_source),
                ("rows", &rows.len().to_string()),
            ],
        );

        self.save_checkpoint(&query.name, &rows)?;
        self.registry.insert(&query.name, rows)
    }

    /// Resolves one aggregation: from checkpoint if present, otherwise by
    /// applying its operations against the registry.
    fn resolve_aggregation(&mut self, aggregation: &AggregationConfig) -> PipelineResult<()> {
        if self.store.exists(&aggregation.name) {
            let rows = self.load_checkpoint(&aggregation.name)?;
            Logger::log(
                Severity::Info,
                "checkpoint_loaded",
                &[
                    ("dataset", &aggregation.name),
                    ("rows", &rows.len().to_string()),
                ],
            );
            return self.registry.insert(&aggregation.name, rows);
        }

        let rows = Aggregator::new(&self.registry)
            .apply(&aggregation.operations)
            .map_err(|e| PipelineError::Aggregation {
                dataset: aggregation.name.clone(),
                source: e,
            })?;

        Logger::log(
            Severity::Info,
            "aggregation_computed",
            &[
                ("dataset", &aggregation.name),
                ("operations", &aggregation.operations.len().to_string()),
                ("rows", &rows.len().to_string()),
            ],
        );

        self.save_checkpoint(&aggregation.name, &rows)?;
        self.registry.insert(&aggregation.name, rows)
    }

    fn load_checkpoint(&self, name: &str) -> PipelineResult<RowSet> {
        self.store
            .load(name)
            .map_err(|e| PipelineError::Checkpoint {
                dataset: name.to_string(),
                source: e,
            })
    }

    fn save_checkpoint(&self, name: &str, rows: &RowSet) -> PipelineResult<()> {
        self.store
            .save(name, rows)
            .map_err(|e| PipelineError::Checkpoint {
                dataset: name.to_string(),
                source: e,
            })?;
        Logger::log(
            Severity::Info,
            "checkpoint_saved",
            &[("dataset", name), ("rows", &rows.len().to_string())],
        );
        Ok(())
    }
}
