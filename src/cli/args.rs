//! CLI argument parsing using clap

use crate::types::RuleNumber;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::config::{ColorOption as ColorChoice, OutputFormat};

/// inventory-lint CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "inventory-lint")]
#[command(about = "Lint Ansible inventory files for naming and layout problems")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides the config file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that assembles a rule set
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LintArgs {
    /// Pattern for the default host-naming rule
    #[arg(long)]
    pub regex: Option<String>,

    /// Rule numbers to skip, comma separated (e.g. 001,004)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<RuleNumber>,

    /// Directory holding rule declarations
    #[arg(long)]
    pub rules_dir: Option<PathBuf>,

    /// Require group headers to both open and close with brackets
    #[arg(long)]
    pub strict_groups: bool,

    /// Configuration file (defaults to ./inventory-lint.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint inventory files
    Check {
        /// Files or directories to check (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format (overrides the config file)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        lint: LintArgs,
    },

    /// List the rules that would be applied
    List {
        /// Output format (overrides the config file)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        lint: LintArgs,
    },
}
