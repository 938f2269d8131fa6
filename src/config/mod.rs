//! Configuration model for lintdiff.
//!
//! This module defines the Config struct that represents `.lintdiff.yaml` at
//! the repository root. The file is optional. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), defaults for every field, and
//! validation of checker definitions and exclusion globs.

mod model;
mod operations;
pub mod types;


pub use model::{CheckerConfig, Config};
pub use operations::load_for_repo;
pub use types::{CONFIG_FILE_NAME, CheckerMode};
