//! Check command implementation
//!
//! This module implements the `inventory-lint check` command, which:
//! - Loads the optional configuration file and merges CLI overrides
//! - Builds the rule set (default host rule, built-ins, rule directory)
//! - Discovers inventory files
//! - Evaluates every file in parallel
//! - Formats output (human or JSONL)
//! - Returns the exit code

use crate::cli::args::{ColorChoice, LintArgs, OutputFormat};
use crate::cli::common::{self, EXIT_ERROR, EXIT_FAILED, EXIT_SUCCESS};
use crate::engine::{ExecutionEngine, ExecutionResult};
use crate::error::LintError;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::Write;
use std::path::PathBuf;
use termcolor::StandardStream;

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: no error-severity findings (warnings allowed)
/// - 1: at least one error-severity finding
/// - 2: configuration or rule error, or an unreadable file with no
///   error-severity findings
pub fn run_check(
    paths: &[PathBuf],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
    lint: &LintArgs,
) -> i32 {
    match run_check_inner(paths, format, color, lint) {
        Ok(result) => exit_code(&result),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Map a finished run to its exit code
pub fn exit_code(result: &ExecutionResult) -> i32 {
    if result.has_errors() {
        EXIT_FAILED
    } else if result.load_failures() > 0 {
        EXIT_ERROR
    } else {
        EXIT_SUCCESS
    }
}

fn run_check_inner(
    paths: &[PathBuf],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
    lint: &LintArgs,
) -> Result<ExecutionResult, LintError> {
    let config = common::load_config(lint)?;
    let rules = common::build_rule_set(lint, &config)?;
    let files = common::discover_files(paths, &config)?;

    if files.is_empty() {
        tracing::warn!("no inventory files found to check");
    }

    let engine = ExecutionEngine::new(rules, common::group_matching(lint, &config));
    let result = engine.execute(files);

    match format.unwrap_or(config.output.format) {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(common::color_choice(color, &config));
            write_or_log(HumanFormatter::new().write(&mut stdout, &result));
        }
        OutputFormat::Jsonl => {
            let mut stdout = std::io::stdout().lock();
            write_or_log(stdout.write_all(JsonlFormatter::new().format(&result).as_bytes()));
        }
    }

    Ok(result)
}

// A closed stdout must not change the exit code.
fn write_or_log(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!("failed to write report: {}", e);
    }
}
