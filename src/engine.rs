//! Rule evaluation, batch execution and file discovery

pub mod evaluator;
pub mod executor;
pub mod file_walker;

pub use evaluator::{CaughtLines, RuleFinding, Verdict, evaluate};
pub use executor::{ExecutionEngine, ExecutionResult, FileReport};
