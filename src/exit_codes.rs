//! Exit code constants for the lintdiff CLI.
//!
//! - 0: Success
//! - 1: User or environment error (not a repository, bad config, missing tool)
//! - 2: Reserved for clap usage errors
//! - 3: Git operation failure (including an unresolvable reference)
//!
//! A range-restricted checker that exits non-zero makes lintdiff exit with
//! the checker's own code instead.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, not inside a repository, or a
/// checker executable that cannot be started.
pub const USER_ERROR: i32 = 1;

/// Git operation failure: unknown reference, no merge-base, failed diff.
pub const GIT_FAILURE: i32 = 3;
