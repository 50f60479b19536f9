#![forbid(unsafe_code)]

//! The lint rule record

use crate::error::RuleError;
use crate::types::{RuleNumber, Scope, Severity};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name of the implicit default host-naming rule
pub const DEFAULT_HOST_RULE_NAME: &str = "USER DEFINED REGEX";

/// Pattern the default host-naming rule uses when none is configured
pub const DEFAULT_HOST_PATTERN: &str =
    r"^[a-zA-Z]*-[a-zA-Z0-9]*-[\[]?[0-9]{2}[:]?[0-9]{0,2}[\]]?\.[a-zA-Z0-9-]*\.[a-zA-Z]*[\s]*$";

/// A single compiled pattern rule
///
/// Identity is `(number, severity, name)`; scope and pattern are attributes.
/// A `LintRule` can only be built from a pattern that compiles, so matching
/// never fails afterwards.
#[derive(Clone)]
pub struct LintRule {
    number: RuleNumber,
    severity: Severity,
    name: String,
    scope: Scope,
    pattern: Regex,
}

impl LintRule {
    /// Compile a rule
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if `pattern` does not compile.
    pub fn new(
        number: RuleNumber,
        severity: Severity,
        name: impl Into<String>,
        scope: Scope,
        pattern: &str,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let compiled = Regex::new(pattern).map_err(|e| RuleError::InvalidRegex {
            rule: display_name(number, severity, &name),
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(LintRule {
            number,
            severity,
            name,
            scope,
            pattern: compiled,
        })
    }

    /// The implicit host-naming rule, `000_ERROR_USER DEFINED REGEX`
    pub fn default_host(pattern: Option<&str>) -> Result<Self, RuleError> {
        Self::new(
            RuleNumber::DEFAULT_HOST,
            Severity::Error,
            DEFAULT_HOST_RULE_NAME,
            Scope::Host,
            pattern.unwrap_or(DEFAULT_HOST_PATTERN),
        )
    }

    pub fn number(&self) -> RuleNumber {
        self.number
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Source text of the compiled pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether this rule reports hosts that do *not* match its pattern
    pub fn is_default_host(&self) -> bool {
        self.number.is_default_host() && self.scope == Scope::Host
    }

    /// Whether the pattern matches starting at the first character of `text`
    ///
    /// The leftmost match is returned by the search, so a match beginning at
    /// offset zero exists exactly when the leftmost one starts there.
    pub fn matches_at_start(&self, text: &str) -> bool {
        self.pattern.find(text).is_some_and(|m| m.start() == 0)
    }

    /// Byte span of the first match anywhere in `text`
    pub fn search(&self, text: &str) -> Option<(usize, usize)> {
        self.pattern.find(text).map(|m| (m.start(), m.end()))
    }
}

fn display_name(number: RuleNumber, severity: Severity, name: &str) -> String {
    format!("{}_{}_{}", number, severity.label(), name)
}

impl fmt::Display for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_name(self.number, self.severity, &self.name))
    }
}

impl fmt::Debug for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LintRule")
            .field("number", &self.number)
            .field("severity", &self.severity)
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl PartialEq for LintRule {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.severity == other.severity && self.name == other.name
    }
}

impl Eq for LintRule {}

impl Hash for LintRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
        self.severity.hash(state);
        self.name.hash(state);
    }
}
