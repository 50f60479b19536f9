//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
pub mod rule_listing;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use rule_listing::{
    RuleEntry, RuleListingHumanFormatter, RuleListingJsonlFormatter, RuleSource,
};
