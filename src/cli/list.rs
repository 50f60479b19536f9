//! List command implementation
//!
//! Prints the rule collection a `check` with the same options would apply:
//! the default host rule, built-ins and the rules directory, minus exclusions.

use crate::cli::args::{LintArgs, OutputFormat};
use crate::cli::common::{self, EXIT_ERROR, EXIT_SUCCESS};
use crate::error::LintError;
use crate::output::{RuleListingHumanFormatter, RuleListingJsonlFormatter, rule_listing};

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Configuration or rule error
pub fn run_list(format: Option<OutputFormat>, lint: &LintArgs) -> i32 {
    match run_list_inner(format, lint) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_list_inner(format: Option<OutputFormat>, lint: &LintArgs) -> Result<(), LintError> {
    let config = common::load_config(lint)?;
    let rules = common::build_rule_set(lint, &config)?;
    let entries = rule_listing::entries(&rules);

    match format.unwrap_or(config.output.format) {
        OutputFormat::Human => RuleListingHumanFormatter::new().write_to_stdout(&entries),
        OutputFormat::Jsonl => RuleListingJsonlFormatter::new().write_to_stdout(&entries),
    }

    Ok(())
}
