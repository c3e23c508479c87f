//! CLI module for blendpipe
//!
//! Provides command-line interface for:
//! - run: execute the configured pipeline, resuming from checkpoints
//! - check: validate a configuration and print a summary

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run_command, run_pipeline};
pub use errors::{CliError, CliResult};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
