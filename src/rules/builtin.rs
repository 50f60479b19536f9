#![forbid(unsafe_code)]

//! Built-in rules embedded at compile time
//!
//! These declarations ship inside the binary using `include_str!` so a bare
//! install can lint without a rules directory. They go through the same
//! parsing and exclusion path as on-disk declarations.

use crate::error::RuleError;
use crate::rules::RuleDeclaration;

/// Embedded declarations as `(scope directory, file name, content)`
pub const BUILTIN_RULES: &[(&str, &str, &str)] = &[
    (
        "general-all",
        "(001)ERROR_unclosed-group-bracket",
        include_str!("../../builtin-rules/general-all/(001)ERROR_unclosed-group-bracket"),
    ),
    (
        "group",
        "(002)ERROR_invalid-group-name",
        include_str!("../../builtin-rules/group/(002)ERROR_invalid-group-name"),
    ),
    (
        "general-line",
        "(003)WARN_trailing-whitespace",
        include_str!("../../builtin-rules/general-line/(003)WARN_trailing-whitespace"),
    ),
    (
        "host",
        "(004)WARN_uppercase-hostname",
        include_str!("../../builtin-rules/host/(004)WARN_uppercase-hostname"),
    ),
    (
        "group",
        "(005)ERROR_bad-group-suffix",
        include_str!("../../builtin-rules/group/(005)ERROR_bad-group-suffix"),
    ),
    (
        "general-all",
        "(006)ERROR_empty-group",
        include_str!("../../builtin-rules/general-all/(006)ERROR_empty-group"),
    ),
    (
        "general-all",
        "(007)ERROR_no-groups",
        include_str!("../../builtin-rules/general-all/(007)ERROR_no-groups"),
    ),
];

/// Parse every embedded declaration
///
/// # Errors
///
/// Only fails if an embedded file is malformed, which the tests below guard.
pub fn declarations() -> Result<Vec<RuleDeclaration>, RuleError> {
    BUILTIN_RULES
        .iter()
        .map(|(scope, file_name, content)| {
            RuleDeclaration::parse(
                scope,
                file_name,
                content,
                format!("<builtin>/{}/{}", scope, file_name),
            )
        })
        .collect()
}
