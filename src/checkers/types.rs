//! Checker definitions and the builtin tool table.

use crate::diff::ChangedLineRange;
use std::path::Path;

/// Extensions handled by the builtin C++ formatter.
pub const CPP_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "h"];

/// Extensions handled by the builtin Python tools.
pub const PY_EXTENSIONS: &[&str] = &["py"];

/// How a checker is pointed at a changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationMode {
    /// Formatter contract: one call per file carrying every changed range,
    /// edited in place. A non-zero exit aborts the run.
    RangeRestricted(RangeArgs),
    /// Linter contract: one call per file with no range arguments. A non-zero
    /// exit means findings and never aborts the run.
    WholeFile,
}

/// Flags a range-restricted checker understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeArgs {
    /// Character between the first and last line of a range (`:` or `-`).
    pub separator: char,
    /// Flag requesting in-place edits, if the tool needs one.
    pub in_place_flag: Option<String>,
    /// Flag that carries a range, joined to it with `=`.
    pub lines_flag: String,
}

impl RangeArgs {
    /// `-i` and `--lines`, which both clang-format and yapf accept.
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            in_place_flag: Some("-i".to_string()),
            lines_flag: "--lines".to_string(),
        }
    }

    /// Format one range with an inclusive end bound, e.g. `--lines=3:6`.
    pub fn format_range(&self, range: &ChangedLineRange) -> String {
        format!(
            "{}={}{}{}",
            self.lines_flag,
            range.start(),
            self.separator,
            range.last()
        )
    }
}

/// An external tool lintdiff runs over changed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checker {
    /// Display name used in logs and errors.
    pub name: String,
    /// Program followed by any fixed leading arguments.
    pub command: Vec<String>,
    /// Applicable extensions, lowercase without leading dots.
    pub extensions: Vec<String>,
    pub mode: InvocationMode,
}

impl Checker {
    pub fn new(
        name: impl Into<String>,
        command: Vec<String>,
        extensions: &[&str],
        mode: InvocationMode,
    ) -> Self {
        Self {
            name: name.into(),
            command,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            mode,
        }
    }

    /// clang-format over C++ sources, ranges as `--lines=<first>:<last>`.
    pub fn clang_format(executable: &str) -> Self {
        Self::new(
            "clang-format",
            vec![executable.to_string()],
            CPP_EXTENSIONS,
            InvocationMode::RangeRestricted(RangeArgs::new(':')),
        )
    }

    /// yapf over Python sources, ranges as `--lines=<first>-<last>`.
    pub fn yapf(executable: &str) -> Self {
        Self::new(
            "yapf",
            vec![executable.to_string()],
            PY_EXTENSIONS,
            InvocationMode::RangeRestricted(RangeArgs::new('-')),
        )
    }

    /// flake8 over whole Python files.
    pub fn flake8(executable: &str) -> Self {
        Self::new(
            "flake8",
            vec![executable.to_string()],
            PY_EXTENSIONS,
            InvocationMode::WholeFile,
        )
    }

    /// The executable to launch.
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether `path` has one of this checker's extensions (case-insensitive).
    pub fn applies_to(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }
}
