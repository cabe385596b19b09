//! Read alias values out of a filter with a set of condition templates

use super::CliError;
use crate::{Aggregation, Binding, FilterManager, Member};

/// Options for the read command
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Filter text to read values from
    pub filter: String,
    /// Condition templates, each containing aliases
    pub conditions: Vec<String>,
    /// `and` or `or`
    pub aggregation: String,
    /// Search every node instead of only the top-level operands
    pub deep: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            filter: String::new(),
            conditions: vec![],
            aggregation: "and".to_string(),
            deep: false,
        }
    }
}

/// Execute a read operation
pub fn execute_read(options: &ReadOptions) -> Result<Vec<Binding>, CliError> {
    let aggregation: Aggregation = options.aggregation.parse()?;
    let members = options.conditions.iter().cloned().map(Member::Text).collect();
    let manager = FilterManager::new(members, Some(aggregation))?;

    let bindings = if options.deep {
        manager.find_values_in_filter(&options.filter)?
    } else {
        manager.read_filter(&options.filter)?
    };
    Ok(bindings)
}
