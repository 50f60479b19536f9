#![forbid(unsafe_code)]

//! Rule evaluation against a single inventory
//!
//! Every rule is evaluated independently against the view its scope
//! selects. Line-scoped rules report each candidate line that matches from
//! its first character; the default host rule inverts this and reports the
//! hosts that fail to match. Whole-file rules run one search over the
//! concatenated text and attribute the match to the line holding its first
//! byte.

use crate::inventory::{Inventory, line_content};
use crate::rules::{LintRule, RuleSet};
use crate::types::{Scope, Severity};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lines a single rule fired on, keyed by line number
pub type CaughtLines = BTreeMap<usize, String>;

/// One rule that fired and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFinding {
    pub rule: Arc<LintRule>,
    /// Matched lines with their terminators removed
    pub lines: CaughtLines,
}

/// Result of evaluating a rule set against one inventory
///
/// Only rules that fired appear, in rule-set order. An empty verdict means
/// the inventory is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    findings: Vec<RuleFinding>,
    has_errors: bool,
}

impl Verdict {
    /// Rules that fired, in rule-set order
    pub fn findings(&self) -> &[RuleFinding] {
        &self.findings
    }

    /// Lines caught by `rule`, if it fired
    pub fn caught(&self, rule: &LintRule) -> Option<&CaughtLines> {
        self.findings
            .iter()
            .find(|f| f.rule.as_ref() == rule)
            .map(|f| &f.lines)
    }

    /// Whether any fired rule has error severity
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Count of `(rule, line)` pairs across all findings
    pub fn total_findings(&self) -> usize {
        self.findings.iter().map(|f| f.lines.len()).sum()
    }
}

/// Evaluate every rule in `rules` against `inventory`
///
/// Pure with respect to both inputs: evaluating the same pair twice yields
/// equal verdicts.
pub fn evaluate(inventory: &Inventory, rules: &RuleSet) -> Verdict {
    let mut findings = Vec::new();
    for rule in rules.iter() {
        let lines = evaluate_rule(inventory, rule);
        if !lines.is_empty() {
            findings.push(RuleFinding {
                rule: Arc::clone(rule),
                lines,
            });
        }
    }

    let has_errors = findings
        .iter()
        .any(|f| f.rule.severity() == Severity::Error);

    tracing::debug!(
        path = %inventory.path().display(),
        fired = findings.len(),
        has_errors,
        "evaluated inventory"
    );

    Verdict {
        findings,
        has_errors,
    }
}

/// Evaluate one rule against the view its scope selects
pub fn evaluate_rule(inventory: &Inventory, rule: &LintRule) -> CaughtLines {
    match rule.scope() {
        Scope::Host => {
            let invert = rule.is_default_host();
            catch_lines(inventory.hosts(), |text| {
                rule.matches_at_start(text) != invert
            })
        }
        Scope::Group => catch_lines(inventory.groups(), |text| rule.matches_at_start(text)),
        Scope::GeneralLine => catch_lines(inventory.lines(), |text| rule.matches_at_start(text)),
        Scope::GeneralAll => rule
            .search(inventory.whole_text())
            .and_then(|(start, _)| inventory.line_at_offset(start))
            .and_then(|number| {
                inventory
                    .line(number)
                    .map(|raw| (number, line_content(raw).to_string()))
            })
            .into_iter()
            .collect(),
    }
}

fn catch_lines<'a>(
    candidates: impl Iterator<Item = (usize, &'a str)>,
    caught: impl Fn(&str) -> bool,
) -> CaughtLines {
    candidates
        .filter_map(|(number, raw)| {
            let text = line_content(raw);
            caught(text).then(|| (number, text.to_string()))
        })
        .collect()
}
