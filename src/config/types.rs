//! Configuration enums, constants, and default value functions.

use serde::Deserialize;

/// Config file looked up at the repository root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".lintdiff.yaml";

/// How a configured checker is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckerMode {
    /// Formatter: changed ranges passed on the command line, must succeed.
    #[default]
    RangeRestricted,
    /// Linter: whole file, non-zero exit means findings.
    WholeFile,
}

// Default value functions for serde
pub(crate) fn default_line_separator() -> char {
    ':'
}
pub(crate) fn default_in_place_flag() -> Option<String> {
    Some("-i".to_string())
}
pub(crate) fn default_lines_flag() -> String {
    "--lines".to_string()
}
