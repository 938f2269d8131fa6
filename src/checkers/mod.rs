//! External checker invocation for lintdiff.
//!
//! A checker is a formatter or linter lintdiff points at changed files:
//! - range-restricted checkers (clang-format, yapf) get one call per file with
//!   every changed range and must succeed, or the run stops
//! - whole-file checkers (flake8) get one call per file and may exit non-zero
//!   to report findings without stopping the run
//!
//! Invocations run one at a time through a [`CommandRunner`].

mod invoke;
mod runner;
mod types;


pub use invoke::{CheckerReport, build_invocation, run_checker};
pub use runner::{CommandRunner, DryRunRunner, ExitOutcome, Invocation, SystemRunner};
pub use types::{CPP_EXTENSIONS, Checker, InvocationMode, PY_EXTENSIONS, RangeArgs};
