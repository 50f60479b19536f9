#![forbid(unsafe_code)]

//! Rule collection
//!
//! A [`RuleSet`] always starts with the default host-naming rule, then
//! gathers built-in and on-disk declarations in a stable order, dropping
//! excluded numbers. An on-disk declaration may take over the number of a
//! built-in; any other repeated number is an error. Loading is
//! all-or-nothing: the first bad declaration fails the whole set.

use crate::error::RuleError;
use crate::rules::{LintRule, RuleDeclaration, builtin};
use crate::types::RuleNumber;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything needed to assemble a rule set
#[derive(Debug, Clone, Default)]
pub struct RuleSetOptions {
    /// Override for the default host rule pattern
    pub host_pattern: Option<String>,
    /// Rule numbers to skip
    pub exclude: BTreeSet<RuleNumber>,
    /// Directory of on-disk declarations
    pub rules_dir: Option<PathBuf>,
    /// Whether to include the embedded built-in declarations
    pub builtins: bool,
}

/// Ordered, immutable-once-built collection of rules
///
/// Rules are held behind `Arc` so verdicts can refer to them and the set can
/// be shared across threads evaluating different files.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Arc<LintRule>>,
    exclude: BTreeSet<RuleNumber>,
    /// Numbers still held by embedded declarations
    builtins: BTreeSet<RuleNumber>,
}

impl RuleSet {
    /// Create a set holding only the default host rule
    pub fn new(default_rule: LintRule) -> Self {
        Self {
            rules: vec![Arc::new(default_rule)],
            exclude: BTreeSet::new(),
            builtins: BTreeSet::new(),
        }
    }

    /// Create a set with the default host rule and an exclusion list for
    /// rules added afterwards
    pub fn with_exclusions(default_rule: LintRule, exclude: BTreeSet<RuleNumber>) -> Self {
        Self {
            rules: vec![Arc::new(default_rule)],
            exclude,
            builtins: BTreeSet::new(),
        }
    }

    /// Build the full set described by `options`
    ///
    /// # Errors
    ///
    /// Returns the first `RuleError` hit while compiling the default rule,
    /// parsing a declaration, or compiling a pattern.
    pub fn build(options: &RuleSetOptions) -> Result<Self, RuleError> {
        let default_rule = LintRule::default_host(options.host_pattern.as_deref())?;
        let mut set = Self::with_exclusions(default_rule, options.exclude.clone());

        if options.builtins {
            for decl in builtin::declarations()? {
                if set.add_declaration(&decl)? {
                    set.builtins.insert(decl.number);
                }
            }
        }

        if let Some(dir) = &options.rules_dir {
            set.load_dir(dir)?;
        }

        tracing::debug!(rules = set.len(), "rule set ready");
        Ok(set)
    }

    /// Add a declaration unless its number is excluded
    ///
    /// A declaration whose number belongs to a built-in replaces that
    /// built-in in place. Returns `Ok(false)` when the declaration was
    /// skipped.
    pub fn add_declaration(&mut self, decl: &RuleDeclaration) -> Result<bool, RuleError> {
        if decl.number.is_default_host() {
            return Err(RuleError::ReservedNumber {
                path: decl.origin.clone(),
            });
        }
        if self.exclude.contains(&decl.number) {
            tracing::debug!(rule = %decl.number, "rule excluded");
            return Ok(false);
        }

        let existing = self.rules.iter().position(|r| r.number() == decl.number);
        if existing.is_some() && !self.builtins.remove(&decl.number) {
            return Err(RuleError::DuplicateNumber {
                number: decl.number.to_string(),
                path: decl.origin.clone(),
            });
        }

        let rule = Arc::new(decl.compile()?);
        match existing {
            Some(index) => {
                tracing::debug!(rule = %rule, "replacing built-in rule {}", self.rules[index]);
                self.rules[index] = rule;
            }
            None => {
                tracing::debug!(rule = %rule, scope = %rule.scope(), "loaded rule");
                self.rules.push(rule);
            }
        }
        Ok(true)
    }

    /// Load every declaration under `dir/<scope>/`
    ///
    /// A missing directory is logged and skipped. Files directly inside
    /// `dir` are ignored, as is anything nested deeper than one level.
    /// Scope directories and files are visited in sorted order so report
    /// ordering is stable across platforms.
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), RuleError> {
        if !dir.exists() {
            tracing::warn!("Rule directory does not exist: {}", dir.display());
            return Ok(());
        }

        if !dir.is_dir() {
            return Err(RuleError::InvalidDeclaration {
                path: dir.to_path_buf(),
                message: "rules path is not a directory".to_string(),
            });
        }

        for scope_dir in sorted_entries(dir)? {
            if !scope_dir.is_dir() {
                continue;
            }
            for path in sorted_entries(&scope_dir)? {
                if !path.is_file() {
                    continue;
                }
                let decl = RuleDeclaration::from_path(&path)?;
                self.add_declaration(&decl)?;
            }
        }

        Ok(())
    }

    /// The default host-naming rule
    pub fn default_rule(&self) -> &LintRule {
        &self.rules[0]
    }

    /// Iterate over all rules in report order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LintRule>> {
        self.rules.iter()
    }

    /// Whether the rule numbered `number` is an embedded declaration
    pub fn is_builtin(&self, number: RuleNumber) -> bool {
        self.builtins.contains(&number)
    }

    /// Look up a rule by number
    pub fn get(&self, number: RuleNumber) -> Option<&LintRule> {
        self.rules
            .iter()
            .find(|r| r.number() == number)
            .map(|r| r.as_ref())
    }

    /// Number of rules, default rule included
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false: the default rule is never removed
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
    let io_err = |e| RuleError::Io {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scope, Severity};
    use tempfile::TempDir;

    fn write_rule(root: &Path, scope: &str, file_name: &str, pattern: &str) -> PathBuf {
        let dir = root.join(scope);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, format!("{}\n", pattern)).unwrap();
        path
    }

    fn number(n: u16) -> RuleNumber {
        RuleNumber::new(n).unwrap()
    }

    #[test]
    fn test_new_set_has_only_default_rule() {
        let set = RuleSet::new(LintRule::default_host(None).unwrap());
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(set.default_rule().is_default_host());
    }

    #[test]
    fn test_build_without_sources() {
        let set = RuleSet::build(&RuleSetOptions::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_build_with_builtins() {
        let set = RuleSet::build(&RuleSetOptions {
            builtins: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(set.len(), 1 + builtin::BUILTIN_RULES.len());
        assert!(set.get(number(1)).is_some());
        assert!(set.is_builtin(number(1)));
        assert!(!set.is_builtin(RuleNumber::DEFAULT_HOST));
    }

    #[test]
    fn test_rules_dir_replaces_builtin_with_same_number() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(001)WARN_my-own-rule", "^db");

        let set = RuleSet::build(&RuleSetOptions {
            builtins: true,
            rules_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(set.len(), 1 + builtin::BUILTIN_RULES.len());
        let rule = set.get(number(1)).unwrap();
        assert_eq!(rule.name(), "my-own-rule");
        assert_eq!(rule.scope(), Scope::Host);
        assert!(!set.is_builtin(number(1)));
        assert!(set.is_builtin(number(2)));
        let order: Vec<String> = set.iter().map(|r| r.number().to_string()).collect();
        assert_eq!(order[1], "001");
    }

    #[test]
    fn test_rules_dir_cannot_repeat_a_replaced_builtin() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "group", "(001)WARN_a", "a");
        write_rule(temp_dir.path(), "host", "(001)WARN_b", "b");

        let result = RuleSet::build(&RuleSetOptions {
            builtins: true,
            rules_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        });
        assert!(matches!(result, Err(RuleError::DuplicateNumber { .. })));
    }

    #[test]
    fn test_excluded_number_drops_builtin_and_replacement() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(001)WARN_mine", "a");

        let set = RuleSet::build(&RuleSetOptions {
            builtins: true,
            rules_dir: Some(temp_dir.path().to_path_buf()),
            exclude: [number(1)].into_iter().collect(),
            ..Default::default()
        })
        .unwrap();
        assert!(set.get(number(1)).is_none());
    }

    #[test]
    fn test_build_rejects_invalid_host_pattern() {
        let result = RuleSet::build(&RuleSetOptions {
            host_pattern: Some("(".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(RuleError::InvalidRegex { .. })));
    }

    #[test]
    fn test_load_dir_missing_is_ok() {
        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        assert!(set.load_dir(Path::new("/nonexistent/rules")).is_ok());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_load_dir_reads_each_scope() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(101)WARN_short", "^.{1,3}$");
        write_rule(temp_dir.path(), "group", "(102)ERROR_upper", "^\\[.*[A-Z]");
        write_rule(temp_dir.path(), "general-all", "(103)ERROR_tabs", "\\t");
        write_rule(temp_dir.path(), "general-line", "(104)WARN_spaces", " +$");
        fs::write(temp_dir.path().join("README"), "not a rule").unwrap();

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        set.load_dir(temp_dir.path()).unwrap();

        assert_eq!(set.len(), 5);
        assert_eq!(set.get(number(101)).unwrap().scope(), Scope::Host);
        assert_eq!(set.get(number(102)).unwrap().severity(), Severity::Error);
        assert_eq!(set.iter().filter(|r| r.scope() == Scope::Host).count(), 2);
    }

    #[test]
    fn test_load_dir_order_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(202)WARN_b", "b");
        write_rule(temp_dir.path(), "group", "(201)WARN_a", "a");

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        set.load_dir(temp_dir.path()).unwrap();

        let order: Vec<String> = set.iter().map(|r| r.number().to_string()).collect();
        // "group" sorts before "host"
        assert_eq!(order, vec!["000", "201", "202"]);
    }

    #[test]
    fn test_invalid_pattern_fails_whole_load() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(301)WARN_ok", "ok");
        write_rule(temp_dir.path(), "host", "(302)ERROR_broken", "[unclosed");

        let result = RuleSet::build(&RuleSetOptions {
            rules_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        });
        assert!(matches!(result, Err(RuleError::InvalidRegex { .. })));
    }

    #[test]
    fn test_excluded_rule_is_not_compiled() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(302)ERROR_broken", "[unclosed");

        let set = RuleSet::build(&RuleSetOptions {
            rules_dir: Some(temp_dir.path().to_path_buf()),
            exclude: [number(302)].into_iter().collect(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_excluding_default_rule_keeps_it() {
        let set = RuleSet::build(&RuleSetOptions {
            exclude: [RuleNumber::DEFAULT_HOST].into_iter().collect(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.default_rule().is_default_host());
    }

    #[test]
    fn test_duplicate_number_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(401)WARN_a", "a");
        write_rule(temp_dir.path(), "group", "(401)WARN_b", "b");

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        let result = set.load_dir(temp_dir.path());
        assert!(matches!(result, Err(RuleError::DuplicateNumber { .. })));
    }

    #[test]
    fn test_reserved_number_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "host", "(000)ERROR_mine", "a");

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        let result = set.load_dir(temp_dir.path());
        assert!(matches!(result, Err(RuleError::ReservedNumber { .. })));
    }

    #[test]
    fn test_unknown_scope_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_rule(temp_dir.path(), "hostnames", "(501)WARN_a", "a");

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        let result = set.load_dir(temp_dir.path());
        assert!(matches!(result, Err(RuleError::UnknownScope { .. })));
    }

    #[test]
    fn test_rules_path_that_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("rules");
        fs::write(&file, "").unwrap();

        let mut set = RuleSet::new(LintRule::default_host(None).unwrap());
        assert!(set.load_dir(&file).is_err());
    }
}
