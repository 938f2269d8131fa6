//! lintdiff: run formatters and linters only on the lines changed since a
//! reference branch.
//!
//! This is the main entry point for the `lintdiff` CLI. It parses arguments,
//! sets up logging, runs the checkers and maps errors to exit codes.

pub mod checkers;
mod cli;
mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod git;

#[cfg(test)]
mod test_support;

use cli::Cli;
use error::LintDiffError;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(|e| {
            LintDiffError::UserError(format!("failed to determine current directory: {}", e))
        })
        .and_then(|cwd| commands::run(&cli, &cwd));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// RUST_LOG always takes precedence; `--verbose` falls back to DEBUG.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
