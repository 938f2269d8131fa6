//! Process launching for checker invocations.

use crate::error::{LintDiffError, Result};
use std::fmt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A fully built command line for one checker on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&shell_words::join(words))
    }
}

/// Exit status of a finished invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs checker invocations to completion, one at a time.
pub trait CommandRunner {
    /// Run `invocation` with `cwd` as working directory and wait for it.
    ///
    /// Returns `Err(LintDiffError::CheckerSpawn)` if the process could not be
    /// started at all.
    fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<ExitOutcome>;
}

/// Spawns real processes. Output goes straight to the user's terminal.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<ExitOutcome> {
        debug!(cwd = %cwd.display(), "running {}", invocation);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| LintDiffError::CheckerSpawn {
                program: invocation.program.clone(),
                message: format!("{} (is it installed and in PATH?)", e),
            })?;

        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}

/// Prints each invocation instead of running it.
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation, _cwd: &Path) -> Result<ExitOutcome> {
        println!("{}", invocation);
        Ok(ExitOutcome::success())
    }
}
