//! Match a condition template against a filter

use serde_json::json;

use super::CliError;
use crate::{Binding, bindings_to_json, compare, parse};

/// Options for the compare command
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Condition text, may contain aliases
    pub condition: String,
    /// Filter text to match against
    pub data: String,
}

/// Result of a compare operation
#[derive(Debug)]
pub struct CompareResult {
    pub matches: bool,
    /// Empty unless `matches`
    pub bindings: Vec<Binding>,
}

impl CompareResult {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "matches": self.matches,
            "bindings": bindings_to_json(&self.bindings),
        })
    }
}

/// Execute a compare operation
pub fn execute_compare(options: &CompareOptions) -> Result<CompareResult, CliError> {
    let condition = parse(&options.condition)?;
    let data = parse(&options.data)?;

    let mut bindings = vec![];
    let matches = compare(&condition, &data, Some(&mut bindings));
    Ok(CompareResult { matches, bindings })
}
