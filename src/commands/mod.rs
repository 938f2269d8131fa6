//! The lintdiff run.
//!
//! Resolves flags and config into a [`RunPlan`], collects the changed line
//! ranges from git, then runs every enabled checker over them in order.

mod plan;


pub use plan::RunPlan;

use crate::checkers::{
    Checker, CheckerReport, CommandRunner, DryRunRunner, SystemRunner, run_checker,
};
use crate::cli::Cli;
use crate::config;
use crate::diff::{FileChangeSet, parse_changed_lines, repository_diff};
use crate::error::{LintDiffError, Result};
use crate::git::get_repo_root;
use std::path::Path;
use tracing::{debug, warn};

/// Run lintdiff from `cwd`, spawning real processes unless `--dry-run`.
pub fn run(cli: &Cli, cwd: &Path) -> Result<()> {
    if cli.dry_run {
        run_with(cli, cwd, &mut DryRunRunner)
    } else {
        run_with(cli, cwd, &mut SystemRunner)
    }
}

/// Run lintdiff from `cwd`, launching checkers through `runner`.
pub fn run_with(cli: &Cli, cwd: &Path, runner: &mut dyn CommandRunner) -> Result<()> {
    let repo_root = get_repo_root(cwd)?;
    let config = config::load_for_repo(cli.config.as_deref(), &repo_root)?;
    let plan = RunPlan::resolve(cli, &config)?;

    if plan.checkers.is_empty() {
        eprintln!("WARNING no checkers are enabled.");
        if !cli.print_ranges {
            return Ok(());
        }
    }

    let diff = repository_diff(&repo_root, &plan.reference)?;
    let mut changes = parse_changed_lines(&diff.text, plan.strip_count);
    plan.apply_excludes(&mut changes);
    debug!(
        files = changes.len(),
        base = %diff.base_commit,
        "collected changed line ranges"
    );

    if cli.print_ranges {
        print_ranges(&changes)?;
    }

    run_checkers(&plan.checkers, &changes, &diff.root, runner)?;
    Ok(())
}

/// Run each checker in turn. The first range-restricted failure aborts the
/// whole run; whole-file findings are reported and the run continues.
pub fn run_checkers(
    checkers: &[Checker],
    changes: &FileChangeSet,
    repo_root: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<Vec<CheckerReport>> {
    let mut reports = Vec::with_capacity(checkers.len());

    for checker in checkers {
        let report = run_checker(checker, changes, repo_root, runner)?;
        if !report.is_clean() {
            warn!(
                checker = %report.checker,
                "findings in {} of {} changed files",
                report.files_with_findings.len(),
                report.files_checked.len()
            );
        }
        reports.push(report);
    }

    Ok(reports)
}

fn print_ranges(changes: &FileChangeSet) -> Result<()> {
    let json = serde_json::to_string_pretty(changes).map_err(|e| {
        LintDiffError::UserError(format!("failed to serialize changed ranges: {}", e))
    })?;
    println!("{}", json);
    Ok(())
}
