//! Config struct definitions.

use super::types::*;
use serde::Deserialize;

/// Configuration for a lintdiff run.
///
/// Every field is optional. Command-line flags take precedence over values
/// set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference branch or commit (overridden by `--ref`).
    #[serde(rename = "ref")]
    pub reference: Option<String>,

    /// Leading path segments to strip from diff paths (overridden by `--prefix`).
    pub prefix: Option<usize>,

    /// Glob patterns for changed files that no checker should touch.
    pub exclude: Vec<String>,

    /// Additional checkers, run after the builtin ones in the order listed.
    pub checkers: Vec<CheckerConfig>,
}

/// A checker defined in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Display name (e.g., "clang-format-17", "mypy").
    pub name: String,

    /// Command to execute (shell-words parsed; no shell). The changed file is
    /// appended after these words.
    pub command: String,

    /// File extensions this checker handles (no leading dots).
    pub extensions: Vec<String>,

    #[serde(default)]
    pub mode: CheckerMode,

    /// Separator between first and last line of a range.
    #[serde(default = "default_line_separator")]
    pub line_separator: char,

    /// In-place flag for range-restricted checkers; `null` omits it.
    #[serde(default = "default_in_place_flag")]
    pub in_place_flag: Option<String>,

    /// Flag carrying each range, joined to it with `=`.
    #[serde(default = "default_lines_flag")]
    pub lines_flag: String,
}
