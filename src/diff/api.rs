//! Public types for diff parsing and the repository diff provider.

use crate::error::Result;
use crate::git::{current_branch, diff_since, get_repo_root, merge_base};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Half-open range `[start, end)` of 1-based line numbers in the new version
/// of a file. Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangedLineRange {
    start: usize,
    end: usize,
}

impl ChangedLineRange {
    /// Create a range, or `None` if it would be empty.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        if end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Range covering `count` lines from `start`, as described by a hunk
    /// header. A zero count (pure deletion) yields `None`.
    pub fn from_hunk(start: usize, count: usize) -> Option<Self> {
        Self::new(start, start.checked_add(count)?)
    }

    /// First changed line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last changed line.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Last changed line (inclusive), the bound formatters expect.
    pub fn last(&self) -> usize {
        self.end - 1
    }
}

impl fmt::Display for ChangedLineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Changed line ranges per file, keyed by repository-relative path.
///
/// Ranges keep the order their hunks appear in the diff and are never merged.
/// A path is only present once it has at least one range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileChangeSet {
    files: BTreeMap<String, Vec<ChangedLineRange>>,
}

impl FileChangeSet {
    /// Record a range against `path`.
    pub fn push(&mut self, path: &str, range: ChangedLineRange) {
        self.files.entry(path.to_string()).or_default().push(range);
    }

    /// Ranges recorded for `path`, if it changed.
    pub fn get(&self, path: &str) -> Option<&[ChangedLineRange]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Files and their ranges in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChangedLineRange])> {
        self.files
            .iter()
            .map(|(path, ranges)| (path.as_str(), ranges.as_slice()))
    }

    /// Keep only the files for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.files.retain(|path, _| keep(path));
    }

    /// Number of files with changes.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file has changes.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Diff of the working tree against the merge-base with a reference.
#[derive(Debug, Clone)]
pub struct RepoDiff {
    /// Absolute path of the repository root; diff paths are relative to it.
    pub root: PathBuf,
    /// Merge-base commit the diff was taken against.
    pub base_commit: String,
    /// Zero-context unified diff text.
    pub text: String,
}

/// Produce the diff between the merge-base of `reference` and the current
/// branch, and the current working tree.
///
/// A detached HEAD is diffed against the merge-base of `reference` and `HEAD`.
///
/// # Returns
///
/// * `Ok(RepoDiff)` - Root path, base commit and diff text
/// * `Err(LintDiffError::RepositoryNotFound)` - `cwd` is not inside a repository
/// * `Err(LintDiffError::ReferenceResolution)` - Unknown reference or no merge-base
/// * `Err(LintDiffError::GitError)` - Any other git failure
pub fn repository_diff<P: AsRef<Path>>(cwd: P, reference: &str) -> Result<RepoDiff> {
    let root = get_repo_root(cwd)?;
    let branch = current_branch(&root)?.unwrap_or_else(|| "HEAD".to_string());
    let base_commit = merge_base(&root, reference, &branch)?;
    debug!(%reference, %branch, %base_commit, "resolved merge-base");

    let text = diff_since(&root, &base_commit)?;

    Ok(RepoDiff {
        root,
        base_commit,
        text,
    })
}
