//! Common helper functions shared across CLI commands
//!
//! Merges command-line overrides with the configuration file and turns the
//! result into a rule set, a group-matching mode and a list of files.

use crate::cli::args::{ColorChoice, LintArgs};
use crate::config::Config;
use crate::engine::file_walker::{FileWalker, FileWalkerError};
use crate::error::{ConfigError, RuleError};
use crate::rules::{RuleSet, RuleSetOptions};
use crate::types::GroupMatching;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Every file passed, possibly with warnings
pub const EXIT_SUCCESS: i32 = 0;
/// At least one error-severity finding
pub const EXIT_FAILED: i32 = 1;
/// Configuration or rule loading failure, or an unreadable file
pub const EXIT_ERROR: i32 = 2;

/// Load the configuration named by `--config`, or the implicit one
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit file cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if the file is invalid.
pub(crate) fn load_config(lint: &LintArgs) -> Result<Config, ConfigError> {
    Config::discover(lint.config.as_deref())
}

/// Merge CLI overrides onto the configuration
///
/// `--regex` and `--rules-dir` replace the file's values; `--exclude` is
/// added to the file's `exclude_rules`.
pub(crate) fn rule_set_options(lint: &LintArgs, config: &Config) -> RuleSetOptions {
    RuleSetOptions {
        host_pattern: lint
            .regex
            .clone()
            .or_else(|| config.lint.host_pattern.clone()),
        exclude: config
            .lint
            .exclude_rules
            .iter()
            .chain(&lint.exclude)
            .copied()
            .collect(),
        rules_dir: Some(
            lint.rules_dir
                .clone()
                .unwrap_or_else(|| config.lint.rules_dir.clone()),
        ),
        builtins: true,
    }
}

/// Build the rule set for a command
///
/// # Errors
///
/// Returns the first `RuleError` hit while loading or compiling rules.
pub(crate) fn build_rule_set(lint: &LintArgs, config: &Config) -> Result<RuleSet, RuleError> {
    RuleSet::build(&rule_set_options(lint, config))
}

pub(crate) fn group_matching(lint: &LintArgs, config: &Config) -> GroupMatching {
    GroupMatching::from_strict_flag(lint.strict_groups || config.lint.strict_groups)
}

/// Collect the files to lint
///
/// Directories are walked with the configured filters. Files are taken as
/// given, and so are paths that do not exist, so that each one produces its
/// own not-found report instead of aborting the run. The result is sorted
/// and deduplicated.
///
/// # Errors
///
/// Returns `FileWalkerError` for an invalid glob or a failed directory walk.
pub(crate) fn discover_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            all_files.push(path.clone());
            continue;
        }

        let walker = FileWalker::new(
            path,
            &config.lint.include,
            &config.lint.exclude,
            &config.lint.skip_dirs,
        )?;
        for file in walker.walk() {
            all_files.push(file?);
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok(all_files)
}

/// Resolve the effective color setting for stdout
pub(crate) fn color_choice(cli: Option<ColorChoice>, config: &Config) -> termcolor::ColorChoice {
    match cli.unwrap_or(config.output.color) {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto => {
            if std::io::stdout().is_terminal() {
                termcolor::ColorChoice::Auto
            } else {
                termcolor::ColorChoice::Never
            }
        }
    }
}
