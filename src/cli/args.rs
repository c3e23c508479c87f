//! CLI argument definitions using clap
//!
//! Commands:
//! - blendpipe run --config <path>
//! - blendpipe check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blendpipe - resumable aggregation of query results from multiple
/// relational sources
#[derive(Parser, Debug)]
#[command(name = "blendpipe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured pipeline, resuming from existing checkpoints
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./blend.json")]
        config: PathBuf,
    },

    /// Validate a configuration and print a summary without executing
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./blend.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
