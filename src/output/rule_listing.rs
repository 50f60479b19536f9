#![forbid(unsafe_code)]

//! Rule listing formatters for the `list` command
//!
//! Supports both human-readable and JSONL output formats.

use crate::rules::{LintRule, RuleSet};
use serde::Serialize;

/// Where a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// The default host-naming rule
    Default,
    /// Embedded in the binary
    Builtin,
    /// Loaded from the rules directory
    Custom,
}

impl RuleSource {
    pub fn of(rule: &LintRule, rules: &RuleSet) -> Self {
        if rule.is_default_host() {
            RuleSource::Default
        } else if rules.is_builtin(rule.number()) {
            RuleSource::Builtin
        } else {
            RuleSource::Custom
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSource::Default => "default",
            RuleSource::Builtin => "builtin",
            RuleSource::Custom => "custom",
        }
    }
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub rule: String,
    pub number: String,
    pub severity: &'static str,
    pub scope: &'static str,
    pub source: RuleSource,
    pub pattern: String,
}

impl RuleEntry {
    pub fn from_rule(rule: &LintRule, rules: &RuleSet) -> Self {
        Self {
            rule: rule.to_string(),
            number: rule.number().to_string(),
            severity: rule.severity().label(),
            scope: rule.scope().as_str(),
            source: RuleSource::of(rule, rules),
            pattern: rule.pattern().to_string(),
        }
    }
}

/// Listing entries sorted by rule number
pub fn entries(rules: &RuleSet) -> Vec<RuleEntry> {
    let mut entries: Vec<RuleEntry> = rules
        .iter()
        .map(|r| RuleEntry::from_rule(r, rules))
        .collect();
    entries.sort_by(|a, b| a.number.cmp(&b.number));
    entries
}

/// Human-readable formatter for the rule listing
pub struct RuleListingHumanFormatter;

impl RuleListingHumanFormatter {
    pub fn new() -> Self {
        RuleListingHumanFormatter
    }

    /// Format the listing for human consumption
    pub fn format(&self, entries: &[RuleEntry]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Rules ({} loaded):\n", entries.len()));
        output.push('\n');

        for entry in entries {
            output.push_str(&format!("{} ({})\n", entry.rule, entry.source.as_str()));
            output.push_str(&format!("  Scope: {}\n", entry.scope));
            output.push_str(&format!("  Pattern: {}\n", entry.pattern));
            output.push('\n');
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, entries: &[RuleEntry]) {
        print!("{}", self.format(entries));
    }
}

impl Default for RuleListingHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct JsonlRuleEntry<'a> {
    rule: &'a str,
    number: &'a str,
    severity: &'a str,
    scope: &'a str,
    source: &'a str,
    pattern: &'a str,
}

/// JSONL formatter for the rule listing
pub struct RuleListingJsonlFormatter;

impl RuleListingJsonlFormatter {
    pub fn new() -> Self {
        RuleListingJsonlFormatter
    }

    /// One JSON object per line for each rule
    pub fn format(&self, entries: &[RuleEntry]) -> String {
        let mut output = String::new();

        for entry in entries {
            let record = JsonlRuleEntry {
                rule: &entry.rule,
                number: &entry.number,
                severity: entry.severity,
                scope: entry.scope,
                source: entry.source.as_str(),
                pattern: &entry.pattern,
            };

            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, entries: &[RuleEntry]) {
        print!("{}", self.format(entries));
    }
}

impl Default for RuleListingJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
