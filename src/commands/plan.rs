//! Resolve command-line flags and config into the checkers to run.

use crate::checkers::Checker;
use crate::cli::Cli;
use crate::config::Config;
use crate::diff::FileChangeSet;
use crate::error::Result;
use globset::GlobSet;
use tracing::debug;

/// Reference used when neither `--ref` nor the config names one.
pub const DEFAULT_REFERENCE: &str = "main";

/// Everything a run needs, decided before touching the diff.
#[derive(Debug)]
pub struct RunPlan {
    pub reference: String,
    pub strip_count: usize,
    pub checkers: Vec<Checker>,
    excludes: Option<GlobSet>,
}

impl RunPlan {
    /// Combine flags and config. Flags win; builtin checkers come first in
    /// the order clang-format, yapf, flake8, followed by configured ones.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let reference = cli
            .reference
            .clone()
            .or_else(|| config.reference.clone())
            .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());
        let strip_count = cli.prefix.or(config.prefix).unwrap_or(0);

        let mut checkers = builtin_checkers(cli);
        checkers.extend(config.checkers()?);

        debug!(
            %reference,
            strip_count,
            checkers = ?checkers.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "resolved run plan"
        );

        Ok(Self {
            reference,
            strip_count,
            checkers,
            excludes: config.exclude_set()?,
        })
    }

    /// Drop excluded files from `changes`.
    pub fn apply_excludes(&self, changes: &mut FileChangeSet) {
        if let Some(excludes) = &self.excludes {
            changes.retain(|path| {
                let excluded = excludes.is_match(path);
                if excluded {
                    debug!("excluding {}", path);
                }
                !excluded
            });
        }
    }
}

/// Builtin checkers enabled by flags. `--py` and `--cpp` fill in default
/// executable names without overriding an explicit `--yapf=NAME` and friends.
fn builtin_checkers(cli: &Cli) -> Vec<Checker> {
    let clang_format = cli
        .clang_format
        .as_deref()
        .or(cli.cpp.then_some("clang-format"));
    let yapf = cli.yapf.as_deref().or(cli.py.then_some("yapf"));
    let flake8 = cli.flake8.as_deref().or(cli.py.then_some("flake8"));

    let mut checkers = Vec::new();
    if let Some(exe) = clang_format {
        checkers.push(Checker::clang_format(exe));
    }
    if let Some(exe) = yapf {
        checkers.push(Checker::yapf(exe));
    }
    if let Some(exe) = flake8 {
        checkers.push(Checker::flake8(exe));
    }
    checkers
}
