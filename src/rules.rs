#![forbid(unsafe_code)]

//! Rule definitions, declarations and the rule collection

pub mod builtin;
mod declaration;
mod registry;
mod rule;

pub use declaration::RuleDeclaration;
pub use registry::{RuleSet, RuleSetOptions};
pub use rule::{DEFAULT_HOST_PATTERN, DEFAULT_HOST_RULE_NAME, LintRule};
