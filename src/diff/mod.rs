//! Changed-line extraction for lintdiff.
//!
//! Turns zero-context unified diff text (`git diff -U0`) into the set of
//! line ranges each file gained or modified, so checkers can be pointed at
//! exactly those lines. Only two kinds of diff line matter:
//! - `+++ <path>` new-file headers, which select the current file
//! - `@@ ... +<start>[,<count>] @@` hunk headers, which yield one range each
//!
//! Everything else in the diff is ignored. Parsing is pure and never touches
//! the filesystem; [`repository_diff`] is the only part that talks to git.

mod api;
mod helpers;
mod parser;

#[cfg(test)]
mod tests;

pub use api::{ChangedLineRange, FileChangeSet, RepoDiff, repository_diff};
pub use parser::parse_changed_lines;
