//! Running one checker over a change set.

use super::runner::{CommandRunner, Invocation};
use super::types::{Checker, InvocationMode};
use crate::diff::{ChangedLineRange, FileChangeSet};
use crate::error::{LintDiffError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of running one checker over every applicable changed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerReport {
    pub checker: String,
    /// Files the checker was invoked on, in invocation order.
    pub files_checked: Vec<String>,
    /// Files for which a whole-file checker exited non-zero.
    pub files_with_findings: Vec<String>,
}

impl CheckerReport {
    fn new(checker: &str) -> Self {
        Self {
            checker: checker.to_string(),
            ..Default::default()
        }
    }

    /// Returns true if no whole-file checker reported findings.
    pub fn is_clean(&self) -> bool {
        self.files_with_findings.is_empty()
    }
}

/// Build the command line for `checker` on `file`.
///
/// Range-restricted checkers get every range in one call:
/// `<command> <file> [in-place flag] <lines flag>=<first><sep><last>...`.
/// Whole-file checkers get `<command> <file>`.
pub fn build_invocation(
    checker: &Checker,
    file: &str,
    ranges: &[ChangedLineRange],
) -> Invocation {
    let mut args: Vec<String> = checker.command.iter().skip(1).cloned().collect();
    args.push(file.to_string());

    if let InvocationMode::RangeRestricted(range_args) = &checker.mode {
        if let Some(flag) = &range_args.in_place_flag {
            args.push(flag.clone());
        }
        args.extend(ranges.iter().map(|range| range_args.format_range(range)));
    }

    Invocation {
        program: checker.program().to_string(),
        args,
    }
}

/// Run `checker` once per applicable file in `changes`, sequentially.
///
/// Files are resolved against `repo_root`, which is also the working
/// directory of every invocation.
///
/// # Returns
///
/// * `Ok(CheckerReport)` - Every invocation ran; whole-file findings are listed
/// * `Err(LintDiffError::CheckerInvocation)` - A range-restricted invocation
///   exited non-zero; no further files are processed
/// * `Err(LintDiffError::CheckerSpawn)` - The checker could not be started
pub fn run_checker(
    checker: &Checker,
    changes: &FileChangeSet,
    repo_root: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<CheckerReport> {
    let mut report = CheckerReport::new(&checker.name);

    for (file, ranges) in changes.iter().filter(|(file, _)| checker.applies_to(file)) {
        if !repo_root.join(file).exists() {
            warn!(
                checker = %checker.name,
                "{} does not exist in the working tree; check --prefix",
                file
            );
        }

        let invocation = build_invocation(checker, file, ranges);
        debug!(checker = %checker.name, "{}", invocation);
        let outcome = runner.run(&invocation, repo_root)?;
        report.files_checked.push(file.to_string());

        if outcome.is_success() {
            continue;
        }

        match checker.mode {
            InvocationMode::RangeRestricted(_) => {
                return Err(LintDiffError::CheckerInvocation {
                    checker: checker.name.clone(),
                    file: file.to_string(),
                    code: outcome.code.unwrap_or(-1),
                });
            }
            InvocationMode::WholeFile => {
                warn!(checker = %checker.name, "{} reported findings", file);
                report.files_with_findings.push(file.to_string());
            }
        }
    }

    Ok(report)
}
