#![forbid(unsafe_code)]

//! On-disk rule declarations
//!
//! A declaration is a file at `<rules-dir>/<scope>/(NNN)LEVEL_name` whose
//! first line is the pattern. The scope comes from the parent directory;
//! number, severity and name come from the file name.

use crate::error::RuleError;
use crate::rules::LintRule;
use crate::types::{RuleNumber, Scope, Severity};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((?P<number>[0-9]{3})\)(?P<level>[A-Z]+)_(?P<name>.+)$")
        .unwrap_or_else(|e| panic!("declaration file-name pattern: {e}"))
});

/// A declaration whose metadata has been parsed but whose pattern has not
/// been compiled yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDeclaration {
    pub number: RuleNumber,
    pub severity: Severity,
    pub name: String,
    pub scope: Scope,
    pub pattern: String,
    /// Where the declaration came from, for error messages
    pub origin: PathBuf,
}

impl RuleDeclaration {
    /// Parse a declaration from its scope directory name, file name and
    /// file content
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownScope` for an unrecognised scope directory
    /// and `RuleError::InvalidDeclaration` for a malformed file name or an
    /// empty pattern.
    pub fn parse(
        scope_dir: &str,
        file_name: &str,
        content: &str,
        origin: impl Into<PathBuf>,
    ) -> Result<Self, RuleError> {
        let origin = origin.into();

        let scope: Scope = scope_dir.parse().map_err(|_| RuleError::UnknownScope {
            scope: scope_dir.to_string(),
            path: origin.clone(),
        })?;

        let invalid = |message: String| RuleError::InvalidDeclaration {
            path: origin.clone(),
            message,
        };

        let caps = FILE_NAME.captures(file_name).ok_or_else(|| {
            invalid(format!(
                "file name '{}' does not follow (NNN)LEVEL_name",
                file_name
            ))
        })?;

        let number: RuleNumber = caps["number"].parse().map_err(invalid)?;
        let severity: Severity = caps["level"].parse().map_err(invalid)?;
        let name = caps["name"].to_string();

        let pattern = content.lines().next().unwrap_or("").trim().to_string();
        if pattern.is_empty() {
            return Err(invalid("pattern line is empty".to_string()));
        }

        Ok(RuleDeclaration {
            number,
            severity,
            name,
            scope,
            pattern,
            origin,
        })
    }

    /// Read and parse a declaration file; the scope is its parent directory
    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let invalid = |message: &str| RuleError::InvalidDeclaration {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid("file name is not valid UTF-8"))?;
        let scope_dir = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid("declaration has no scope directory"))?;

        let content = std::fs::read_to_string(path).map_err(|e| RuleError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(scope_dir, file_name, &content, path)
    }

    /// Compile the pattern into a rule
    pub fn compile(&self) -> Result<LintRule, RuleError> {
        LintRule::new(
            self.number,
            self.severity,
            self.name.clone(),
            self.scope,
            &self.pattern,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_declaration() {
        let decl =
            RuleDeclaration::parse("host", "(012)WARN_short_name", "^[a-z]{1,3}$\n", "x").unwrap();
        assert_eq!(decl.number, RuleNumber::new(12).unwrap());
        assert_eq!(decl.severity, Severity::Warning);
        assert_eq!(decl.name, "short_name");
        assert_eq!(decl.scope, Scope::Host);
        assert_eq!(decl.pattern, "^[a-z]{1,3}$");
    }

    #[test]
    fn test_pattern_is_first_line_only() {
        let decl =
            RuleDeclaration::parse("group", "(001)ERROR_x", "  ^\\[x  \nignored\n", "x").unwrap();
        assert_eq!(decl.pattern, "^\\[x");
    }

    #[test]
    fn test_unknown_scope() {
        let result = RuleDeclaration::parse("hosts", "(001)ERROR_x", "a", "x");
        assert!(matches!(result, Err(RuleError::UnknownScope { .. })));
    }

    #[test]
    fn test_bad_file_names() {
        for name in ["001ERROR_x", "(01)ERROR_x", "(001)ERROR", "(001)INFO_x", "(001)error_x"] {
            let result = RuleDeclaration::parse("host", name, "a", "x");
            assert!(
                matches!(result, Err(RuleError::InvalidDeclaration { .. })),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_empty_pattern() {
        let result = RuleDeclaration::parse("host", "(001)ERROR_x", "\n", "x");
        assert!(matches!(result, Err(RuleError::InvalidDeclaration { .. })));
    }

    #[test]
    fn test_compile_reports_invalid_regex() {
        let decl = RuleDeclaration::parse("host", "(001)ERROR_x", "(", "x").unwrap();
        assert!(matches!(decl.compile(), Err(RuleError::InvalidRegex { .. })));
    }

    #[test]
    fn test_from_path_uses_parent_directory_as_scope() {
        let temp_dir = TempDir::new().unwrap();
        let scope_dir = temp_dir.path().join("general-all");
        fs::create_dir(&scope_dir).unwrap();
        let path = scope_dir.join("(020)ERROR_tabs");
        fs::write(&path, "\\t\n").unwrap();

        let decl = RuleDeclaration::from_path(&path).unwrap();
        assert_eq!(decl.scope, Scope::GeneralAll);
        assert_eq!(decl.origin, path);
    }
}
