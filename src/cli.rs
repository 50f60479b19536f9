//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub(crate) mod common;
pub mod list;

pub use args::{Cli, ColorChoice, Command, LintArgs, OutputFormat};
pub use common::{EXIT_ERROR, EXIT_FAILED, EXIT_SUCCESS};
