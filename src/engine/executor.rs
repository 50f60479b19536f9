#![forbid(unsafe_code)]

//! Parallel execution engine for linting many inventories
//!
//! Each file gets its own [`Inventory`] and [`Verdict`]; nothing is shared
//! between files except the read-only rule set, so files are fanned out
//! with rayon and the reports are gathered back in input order.

use crate::engine::evaluator::{Verdict, evaluate};
use crate::error::InventoryError;
use crate::inventory::Inventory;
use crate::rules::RuleSet;
use crate::types::GroupMatching;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of linting a single file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// The verdict, or why the file could not be loaded
    pub outcome: Result<Verdict, InventoryError>,
}

impl FileReport {
    /// Whether an error-severity rule fired in this file
    pub fn has_errors(&self) -> bool {
        self.outcome.as_ref().is_ok_and(Verdict::has_errors)
    }

    /// Whether the file could not be read
    pub fn failed_to_load(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Result of linting a batch of files
#[derive(Debug)]
pub struct ExecutionResult {
    /// One report per input file, in input order
    pub reports: Vec<FileReport>,
    /// Number of files checked
    pub files_checked: usize,
    /// Number of rules evaluated against each file
    pub rules_executed: usize,
}

impl ExecutionResult {
    /// Whether any file has an error-severity finding
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(FileReport::has_errors)
    }

    /// Number of files that could not be read
    pub fn load_failures(&self) -> usize {
        self.reports.iter().filter(|r| r.failed_to_load()).count()
    }

    /// Number of files that failed for any reason
    pub fn files_failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.has_errors() || r.failed_to_load())
            .count()
    }

    /// Count of `(file, rule, line)` findings
    pub fn total_findings(&self) -> usize {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .map(Verdict::total_findings)
            .sum()
    }
}

/// Execution engine that lints files against a shared rule set
pub struct ExecutionEngine {
    rules: Arc<RuleSet>,
    group_matching: GroupMatching,
}

impl ExecutionEngine {
    /// Creates a new ExecutionEngine
    ///
    /// # Arguments
    ///
    /// * `rules` - The fully loaded rule set
    /// * `group_matching` - How group headers are recognised
    pub fn new(rules: RuleSet, group_matching: GroupMatching) -> Self {
        Self {
            rules: Arc::new(rules),
            group_matching,
        }
    }

    /// The rule set this engine evaluates
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Parse and evaluate a single file
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the file cannot be read; this never
    /// affects other files.
    pub fn lint_file(&self, path: &Path) -> Result<Verdict, InventoryError> {
        let inventory = Inventory::from_path(path, self.group_matching)?;
        Ok(evaluate(&inventory, &self.rules))
    }

    /// Lint every file in parallel
    pub fn execute(&self, files: Vec<PathBuf>) -> ExecutionResult {
        let files_checked = files.len();
        let rules_executed = self.rules.len();

        let reports: Vec<FileReport> = files
            .into_par_iter()
            .map(|path| {
                let outcome = self.lint_file(&path);
                if let Err(e) = &outcome {
                    tracing::warn!("{}", e);
                }
                FileReport { path, outcome }
            })
            .collect();

        ExecutionResult {
            reports,
            files_checked,
            rules_executed,
        }
    }
}
