#![forbid(unsafe_code)]

//! inventory-lint: rule-based linting for Ansible INI inventory files
//!
//! An inventory is parsed into lines, group headers and host entries. A
//! rule set pairs regular expressions with a scope and a severity; every
//! rule is evaluated against every file and the caught lines are collected
//! into a per-file verdict.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, InventoryError, LintError, RuleError};

// Re-export core domain types for convenient access
pub use engine::{Verdict, evaluate};
pub use inventory::Inventory;
pub use rules::{LintRule, RuleSet};
pub use types::{GroupMatching, RuleNumber, Scope, Severity};
