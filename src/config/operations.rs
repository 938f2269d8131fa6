//! Config loading, validation, and conversion into runtime types.

use super::model::{CheckerConfig, Config};
use super::types::{CONFIG_FILE_NAME, CheckerMode};
use crate::checkers::{Checker, InvocationMode, RangeArgs};
use crate::error::{LintDiffError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Load the config for a run.
///
/// An explicit path must exist. Without one, `<repo_root>/.lintdiff.yaml` is
/// used if present, otherwise the defaults.
pub fn load_for_repo(explicit: Option<&Path>, repo_root: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let default_path = repo_root.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        Config::load(default_path)
    } else {
        debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Config::default())
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LintDiffError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");

        let content = std::fs::read_to_string(path).map_err(|e| {
            LintDiffError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                LintDiffError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - checker names are non-empty and unique
    /// - checker commands parse into at least one word
    /// - checker extensions are non-empty, without leading dots
    /// - exclude patterns are valid globs
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for checker in &self.checkers {
            checker.validate()?;
            if !names.insert(checker.name.as_str()) {
                return Err(LintDiffError::UserError(format!(
                    "config validation failed: duplicate checker name '{}'",
                    checker.name
                )));
            }
        }

        self.exclude_set()?;
        Ok(())
    }

    /// Runtime checkers for every configured entry, in file order.
    pub fn checkers(&self) -> Result<Vec<Checker>> {
        self.checkers.iter().map(CheckerConfig::to_checker).collect()
    }

    /// Compiled exclusion globs, or `None` when nothing is excluded.
    pub fn exclude_set(&self) -> Result<Option<GlobSet>> {
        let mut builder = GlobSetBuilder::new();
        let mut any = false;

        for pattern in &self.exclude {
            let normalized = pattern.trim().replace('\\', "/");
            if normalized.is_empty() {
                continue;
            }
            let glob = Glob::new(&normalized).map_err(|e| {
                LintDiffError::UserError(format!(
                    "invalid exclude pattern '{}': {}\n\
                     Fix: edit {} and correct or remove this pattern.",
                    pattern, e, CONFIG_FILE_NAME
                ))
            })?;
            builder.add(glob);
            any = true;
        }

        if !any {
            return Ok(None);
        }

        builder
            .build()
            .map(Some)
            .map_err(|e| LintDiffError::UserError(format!("invalid exclude patterns: {}", e)))
    }
}

impl CheckerConfig {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LintDiffError::UserError(
                "config validation failed: checker name must be non-empty".to_string(),
            ));
        }

        self.command_words()?;

        if self.extensions.is_empty() {
            return Err(LintDiffError::UserError(format!(
                "config validation failed: checker '{}' needs at least one extension",
                self.name
            )));
        }

        for ext in &self.extensions {
            if ext.is_empty() {
                return Err(LintDiffError::UserError(format!(
                    "config validation failed: checker '{}' has an empty extension",
                    self.name
                )));
            }
            if ext.starts_with('.') {
                return Err(LintDiffError::UserError(format!(
                    "config validation failed: extensions must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }

    fn command_words(&self) -> Result<Vec<String>> {
        let words = shell_words::split(self.command.trim()).map_err(|e| {
            LintDiffError::UserError(format!(
                "failed to parse command for checker '{}': {}\nCommand: {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.name, e, self.command
            ))
        })?;

        if words.is_empty() {
            return Err(LintDiffError::UserError(format!(
                "config validation failed: checker '{}' has an empty command",
                self.name
            )));
        }

        Ok(words)
    }

    /// Convert into a runtime [`Checker`].
    pub fn to_checker(&self) -> Result<Checker> {
        let mode = match self.mode {
            CheckerMode::RangeRestricted => InvocationMode::RangeRestricted(RangeArgs {
                separator: self.line_separator,
                in_place_flag: self.in_place_flag.clone(),
                lines_flag: self.lines_flag.clone(),
            }),
            CheckerMode::WholeFile => InvocationMode::WholeFile,
        };
        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();

        Ok(Checker::new(
            self.name.clone(),
            self.command_words()?,
            &extensions,
            mode,
        ))
    }
}
