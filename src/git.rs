//! Git command runner for lintdiff.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. Every query lintdiff makes against the
//! repository goes through this module, and none of them write.

use crate::error::{LintDiffError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// The message worth showing to a user when the command failed.
    fn failure_message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Spawn git and capture its output without interpreting the exit status.
fn spawn_git(cwd: &Path, args: &[&str]) -> std::io::Result<Output> {
    debug!(cwd = %cwd.display(), "git {}", args.join(" "));
    Command::new("git").current_dir(cwd).args(args).output()
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(LintDiffError::GitError)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = spawn_git(cwd.as_ref(), args).map_err(|e| {
        LintDiffError::GitError(format!(
            "failed to execute git {}: {}",
            subcommand(args),
            e
        ))
    })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        Err(LintDiffError::GitError(format!(
            "git {} failed (exit code {}): {}",
            subcommand(args),
            output.status.code().unwrap_or(-1),
            git_output.failure_message()
        )))
    }
}

/// The git subcommand in `args`, skipping leading `-c key=value` options.
fn subcommand<'a>(args: &[&'a str]) -> &'a str {
    let mut rest = args;
    while let ["-c", _, tail @ ..] = rest {
        rest = tail;
    }
    rest.first().copied().unwrap_or("")
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Works from any subdirectory of the work tree.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(LintDiffError::RepositoryNotFound)` - Not inside a git repository,
///   or git is not installed (exit code 1)
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let output = spawn_git(cwd.as_ref(), &["rev-parse", "--show-toplevel"]).map_err(|e| {
        LintDiffError::RepositoryNotFound(format!(
            "failed to execute git: {} (is git installed?)",
            e
        ))
    })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() && !git_output.is_empty() {
        Ok(PathBuf::from(&git_output.stdout))
    } else {
        Err(LintDiffError::RepositoryNotFound(
            "failed to determine git root directory. Is this a git repository?".to_string(),
        ))
    }
}

/// Name of the currently checked-out branch.
///
/// Returns `None` on a detached HEAD, where `git branch --show-current`
/// prints nothing.
pub fn current_branch<P: AsRef<Path>>(cwd: P) -> Result<Option<String>> {
    let output = run_git(cwd, &["branch", "--show-current"])?;
    if output.is_empty() {
        Ok(None)
    } else {
        Ok(Some(output.stdout))
    }
}

/// Resolve the merge-base between `reference` and `branch`.
///
/// # Returns
///
/// * `Ok(String)` - The full SHA of the common ancestor
/// * `Err(LintDiffError::ReferenceResolution)` - `reference` does not name a
///   commit, or the two share no history
pub fn merge_base<P: AsRef<Path>>(cwd: P, reference: &str, branch: &str) -> Result<String> {
    let cwd = cwd.as_ref();

    let commitish = format!("{}^{{commit}}", reference);
    if run_git(cwd, &["rev-parse", "--verify", "--quiet", &commitish]).is_err() {
        return Err(LintDiffError::ReferenceResolution {
            reference: reference.to_string(),
            message: "not a branch, tag or commit in this repository".to_string(),
        });
    }

    match run_git(cwd, &["merge-base", reference, branch]) {
        Ok(output) if !output.is_empty() => Ok(output.stdout),
        Ok(_) | Err(_) => Err(LintDiffError::ReferenceResolution {
            reference: reference.to_string(),
            message: format!("no common ancestor with '{}'", branch),
        }),
    }
}

/// Zero-context unified diff between `base_commit` and the working tree.
///
/// Paths are relative to `cwd`, so callers pass the repository root to get
/// root-relative paths. The `a/` and `b/` prefixes are forced so that user
/// settings such as `diff.noprefix` cannot change what `--prefix` strips, and
/// `core.quotePath` is off so non-ASCII names come through unescaped.
pub fn diff_since<P: AsRef<Path>>(cwd: P, base_commit: &str) -> Result<String> {
    let output = run_git(
        cwd,
        &[
            "-c",
            "core.quotePath=false",
            "diff",
            "-U0",
            "--no-color",
            "--no-ext-diff",
            "--src-prefix=a/",
            "--dst-prefix=b/",
            "--relative",
            base_commit,
        ],
    )?;
    Ok(output.stdout)
}
