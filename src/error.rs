//! Error types for lintdiff.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lintdiff operations.
///
/// Every variant is fatal: it surfaces in `main`, which prints the message
/// and exits with [`LintDiffError::exit_code`]. A linter reporting findings is
/// not an error and never becomes one of these.
#[derive(Error, Debug)]
pub enum LintDiffError {
    /// Invalid arguments, configuration, or local I/O failure.
    #[error("{0}")]
    UserError(String),

    /// The working directory is not inside a git repository.
    #[error("{0}")]
    RepositoryNotFound(String),

    /// The reference does not name a commit or shares no history with the
    /// current branch.
    #[error("cannot resolve reference '{reference}': {message}")]
    ReferenceResolution { reference: String, message: String },

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// A checker executable could not be started.
    #[error("failed to run {program}: {message}")]
    CheckerSpawn { program: String, message: String },

    /// A range-restricted checker exited non-zero.
    #[error("{checker} failed on {file} (exit code {code})")]
    CheckerInvocation {
        checker: String,
        file: String,
        code: i32,
    },
}

impl LintDiffError {
    /// Returns the process exit code for this error.
    ///
    /// A failed range-restricted checker propagates its own exit code when it
    /// fits in a process exit status, otherwise `USER_ERROR`.
    pub fn exit_code(&self) -> i32 {
        match self {
            LintDiffError::UserError(_) => exit_codes::USER_ERROR,
            LintDiffError::RepositoryNotFound(_) => exit_codes::USER_ERROR,
            LintDiffError::ReferenceResolution { .. } => exit_codes::GIT_FAILURE,
            LintDiffError::GitError(_) => exit_codes::GIT_FAILURE,
            LintDiffError::CheckerSpawn { .. } => exit_codes::USER_ERROR,
            LintDiffError::CheckerInvocation { code, .. } => {
                if (1..=255).contains(code) {
                    *code
                } else {
                    exit_codes::USER_ERROR
                }
            }
        }
    }
}

/// Result type alias for lintdiff operations.
pub type Result<T> = std::result::Result<T, LintDiffError>;
