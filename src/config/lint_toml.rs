//! Parsing and validation for inventory-lint.toml configuration files

use crate::error::ConfigError;
use crate::types::RuleNumber;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "inventory-lint.toml";

/// Main configuration struct for inventory-lint.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lint settings
    #[serde(default)]
    pub lint: LintConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `explicit` if given, else `inventory-lint.toml` from the working
    /// directory if it exists, else defaults
    ///
    /// An explicit path that does not exist is an error; a missing implicit
    /// file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(CONFIG_FILE_NAME);
                if implicit.exists() {
                    tracing::debug!("loading {}", CONFIG_FILE_NAME);
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pattern) = &self.lint.host_pattern {
            regex::Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("Invalid host_pattern '{}': {}", pattern, e))
            })?;
        }

        for pattern in self.lint.include.iter().chain(&self.lint.exclude) {
            globset::Glob::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
        }

        if self.lint.skip_dirs.iter().any(|d| d.is_empty() || d.contains('/')) {
            return Err(ConfigError::Validation(
                "skip_dirs entries must be bare directory names".to_string(),
            ));
        }

        Ok(())
    }
}

/// `[lint]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Pattern for the default host-naming rule
    #[serde(default)]
    pub host_pattern: Option<String>,

    /// Rule numbers to skip
    #[serde(default)]
    pub exclude_rules: Vec<RuleNumber>,

    /// Directory holding `<scope>/(NNN)LEVEL_name` declarations
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,

    /// Require both brackets on group headers
    #[serde(default)]
    pub strict_groups: bool,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Globs a walked file must match
    #[serde(default)]
    pub include: Vec<String>,

    /// Globs that drop a walked file
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rules")
}

fn default_skip_dirs() -> Vec<String> {
    vec!["group_vars".to_string(), "host_vars".to_string()]
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            host_pattern: None,
            exclude_rules: Vec::new(),
            rules_dir: default_rules_dir(),
            strict_groups: false,
            skip_dirs: default_skip_dirs(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
