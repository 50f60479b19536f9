#![forbid(unsafe_code)]

//! Core domain types for inventory-lint
//!
//! Scope and severity are closed enums so that rule evaluation can match on
//! them exhaustively and unknown values are rejected at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// The tag used in declaration file names and rule display names
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{}', expected WARN or ERROR", other)),
        }
    }
}

/// Which structural subset of an inventory a rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Every physical line, one at a time
    GeneralLine,
    /// The whole file as a single text
    GeneralAll,
    /// Bare host entries only
    Host,
    /// Group header lines only
    Group,
}

impl Scope {
    /// All scopes, in declaration-directory order
    pub fn all() -> [Scope; 4] {
        [Scope::GeneralLine, Scope::GeneralAll, Scope::Host, Scope::Group]
    }

    /// Directory name used for declarations of this scope
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::GeneralLine => "general-line",
            Scope::GeneralAll => "general-all",
            Scope::Host => "host",
            Scope::Group => "group",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::all()
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("unknown scope '{}'", s))
    }
}

/// A rule's numeric identity, rendered as three digits
///
/// `000` is reserved for the default host-naming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct RuleNumber(u16);

impl RuleNumber {
    /// Number of the default host-naming rule
    pub const DEFAULT_HOST: RuleNumber = RuleNumber(0);

    /// Largest number a three-digit identity can carry
    pub const MAX: u16 = 999;

    /// Creates a RuleNumber, returning None above 999
    pub fn new(value: u16) -> Option<Self> {
        (value <= Self::MAX).then_some(RuleNumber(value))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_default_host(&self) -> bool {
        *self == Self::DEFAULT_HOST
    }
}

impl fmt::Display for RuleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl FromStr for RuleNumber {
    type Err = String;

    /// Accepts one to three decimal digits, so `4`, `04` and `004` are equal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid rule number '{}'", s));
        }
        s.parse::<u16>()
            .ok()
            .and_then(RuleNumber::new)
            .ok_or_else(|| format!("invalid rule number '{}'", s))
    }
}

impl TryFrom<u16> for RuleNumber {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        RuleNumber::new(value).ok_or_else(|| format!("rule number {} exceeds 999", value))
    }
}

impl From<RuleNumber> for u16 {
    fn from(number: RuleNumber) -> Self {
        number.0
    }
}

/// How strictly group-header lines are recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMatching {
    /// Starts with `[` or ends with `]`
    #[default]
    Lenient,
    /// Starts with `[` and ends with `]`
    Strict,
}

impl GroupMatching {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            GroupMatching::Strict
        } else {
            GroupMatching::Lenient
        }
    }

    /// Whether `content` (line terminator already removed) is a group header
    pub fn is_group_header(&self, content: &str) -> bool {
        let opens = content.starts_with('[');
        let closes = content.ends_with(']');
        match self {
            GroupMatching::Lenient => opens || closes,
            GroupMatching::Strict => opens && closes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels_round_trip() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "WARN");
        assert!("warn".parse::<Severity>().is_err());
        assert!("INFO".parse::<Severity>().is_err());
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("general-line".parse::<Scope>().unwrap(), Scope::GeneralLine);
        assert_eq!("general-all".parse::<Scope>().unwrap(), Scope::GeneralAll);
        assert_eq!("host".parse::<Scope>().unwrap(), Scope::Host);
        assert_eq!("group".parse::<Scope>().unwrap(), Scope::Group);
        assert!("hosts".parse::<Scope>().is_err());
    }

    #[test]
    fn test_rule_number_parsing() {
        assert_eq!("000".parse::<RuleNumber>().unwrap(), RuleNumber::DEFAULT_HOST);
        assert_eq!("4".parse::<RuleNumber>().unwrap(), "004".parse().unwrap());
        assert_eq!("042".parse::<RuleNumber>().unwrap().to_string(), "042");
        assert!("".parse::<RuleNumber>().is_err());
        assert!("1000".parse::<RuleNumber>().is_err());
        assert!("-1".parse::<RuleNumber>().is_err());
        assert!("abc".parse::<RuleNumber>().is_err());
    }

    #[test]
    fn test_rule_number_bounds() {
        assert!(RuleNumber::new(999).is_some());
        assert!(RuleNumber::new(1000).is_none());
        assert!(RuleNumber::try_from(1000u16).is_err());
    }

    #[test]
    fn test_group_matching_lenient_accepts_either_edge() {
        let lenient = GroupMatching::Lenient;
        assert!(lenient.is_group_header("[web]"));
        assert!(lenient.is_group_header("[web"));
        assert!(lenient.is_group_header("value]"));
        assert!(!lenient.is_group_header("web"));
    }

    #[test]
    fn test_group_matching_strict_requires_both_edges() {
        let strict = GroupMatching::Strict;
        assert!(strict.is_group_header("[web]"));
        assert!(!strict.is_group_header("[web"));
        assert!(!strict.is_group_header("value]"));
    }
}
