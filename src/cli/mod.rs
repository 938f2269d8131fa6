//! CLI argument parsing for lintdiff.
//!
//! Uses clap derive macros for declarative argument definitions. The run
//! itself lives in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

/// Run code formatters and linters on a git repository, restricted to the
/// files and lines changed since a reference branch or commit.
///
/// Formatters (clang-format, yapf) are given the changed line ranges and edit
/// files in place; a formatter failure stops the run. Linters (flake8) check
/// whole changed files and report findings without stopping the run.
#[derive(Parser, Debug, Default)]
#[command(name = "lintdiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable all Python checks (yapf and flake8).
    #[arg(long)]
    pub py: bool,

    /// Reformat changed Python lines with yapf, optionally naming the executable.
    #[arg(
        long,
        value_name = "NAME",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "yapf"
    )]
    pub yapf: Option<String>,

    /// Check changed Python files with flake8, optionally naming the executable.
    #[arg(
        long,
        value_name = "NAME",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "flake8"
    )]
    pub flake8: Option<String>,

    /// Enable all C++ checks (clang-format).
    #[arg(long)]
    pub cpp: bool,

    /// Reformat changed C++ lines with clang-format, optionally naming the executable.
    #[arg(
        long,
        value_name = "NAME",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "clang-format"
    )]
    pub clang_format: Option<String>,

    /// Name or hash of the reference branch / commit [default: main].
    #[arg(long = "ref", value_name = "NAME")]
    pub reference: Option<String>,

    /// Strip this number of leading directories from diff file paths [default: 0].
    #[arg(long, value_name = "NUM")]
    pub prefix: Option<usize>,

    /// Config file to use instead of `.lintdiff.yaml` at the repository root.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the checker commands instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the changed line ranges as JSON before running checkers.
    #[arg(long)]
    pub print_ranges: bool,

    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
