use crate::checkers::{CommandRunner, ExitOutcome, Invocation};
use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Repository on an unborn-then-committed `main` branch with one README commit.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init", "--quiet"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "--quiet", "-m", "Initial commit"]);

    temp_dir
}

/// Write `rel_path` (creating parent directories) and commit it.
pub(crate) fn commit_file(repo_dir: &Path, rel_path: &str, content: &str, message: &str) {
    let file = repo_dir.join(rel_path);
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&file, content).unwrap();
    git(repo_dir, &["add", rel_path]);
    git(repo_dir, &["commit", "--quiet", "-m", message]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// Runner that records invocations instead of spawning anything.
///
/// Every invocation succeeds unless its file argument was registered with
/// [`RecordingRunner::exit_with`].
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    pub(crate) calls: Vec<(Invocation, PathBuf)>,
    exit_codes: HashMap<String, i32>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make any invocation on `file` exit with `code`.
    pub(crate) fn exit_with(mut self, file: &str, code: i32) -> Self {
        self.exit_codes.insert(file.to_string(), code);
        self
    }

    pub(crate) fn invocations(&self) -> Vec<&Invocation> {
        self.calls.iter().map(|(invocation, _)| invocation).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<ExitOutcome> {
        self.calls.push((invocation.clone(), cwd.to_path_buf()));
        let code = invocation
            .args
            .iter()
            .find_map(|arg| self.exit_codes.get(arg).copied());
        Ok(code.map_or_else(ExitOutcome::success, ExitOutcome::failure))
    }
}
