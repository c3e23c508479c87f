//! CLI command implementations
//!
//! Backend protocol drivers live outside this crate: embedding
//! applications implement `source::DataSourceClient` and bind instances
//! into the registry passed to `run_pipeline`. The `run` subcommand binds
//! no drivers, so it executes fully checkpointed pipelines and fails with
//! a client-not-bound error for any query that still needs its source.

use std::path::{Path, PathBuf};

use crate::checkpoint::CheckpointStore;
use crate::config::{self, AppConfig};
use crate::pipeline::Orchestrator;
use crate::source::ClientRegistry;

use super::args::Command;
use super::errors::CliResult;

/// Dispatches one parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Run { config } => {
            let clients = ClientRegistry::new();
            run_pipeline(&config, &clients)
        }
        Command::Check { config } => check(&config),
    }
}

/// Loads the configuration at `config_path` and runs the pipeline with
/// the given clients.
pub fn run_pipeline(config_path: &Path, clients: &ClientRegistry) -> CliResult<()> {
    let config = config::load(config_path)?;
    let store = CheckpointStore::open(resolve_results_dir(config_path, &config))?;

    Orchestrator::new(&config, clients, store).run()?;

    Ok(())
}

/// Loads and validates a configuration, then prints a summary.
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = config::load(config_path)?;

    match &config.description {
        Some(description) => println!("Configuration OK: {}", description),
        None => println!("Configuration OK"),
    }
    println!("  connections:  {}", config.connections.len());
    println!("  queries:      {}", config.queries.len());
    for query in &config.queries {
        println!("    - {} (source: {})", query.name, query.data_source);
    }
    println!("  aggregations: {}", config.aggregations.len());
    for aggregation in &config.aggregations {
        println!(
            "    - {} ({} operations)",
            aggregation.name,
            aggregation.operations.len()
        );
    }
    println!(
        "  results dir:  {}",
        resolve_results_dir(config_path, &config).display()
    );

    Ok(())
}

/// Checkpoint directory for a configuration: the configured
/// `results_dir` when present, else `results/` beside the configuration
/// file.
fn resolve_results_dir(config_path: &Path, config: &AppConfig) -> PathBuf {
    if let Some(dir) = &config.results_dir {
        return dir.clone();
    }

    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("results")
}
