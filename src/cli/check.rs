//! Parse filter text and show its canonical form

use super::CliError;
use crate::{parse, to_json};

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter text to parse
    pub filter: String,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Canonical tree in its JSON form
    Success(serde_json::Value),
}

/// Execute a parse operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let filter = parse(&options.filter)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    Ok(CheckResult::Success(to_json(&filter)))
}
