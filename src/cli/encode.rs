//! Write filters back as text

use super::CliError;
use crate::{Binding, bindings_from_json, encode, encode_json, parse};

/// Options for the encode command
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Filter tree in its JSON form
    pub input: Option<String>,
    /// Alias values, `[[name, value], ...]` or `{"name": value}`
    pub bindings: Option<String>,
}

/// Options for the rewrite command
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Filter text containing aliases
    pub filter: String,
    /// Alias values, `[[name, value], ...]` or `{"name": value}`
    pub bindings: String,
}

fn read_bindings(text: &str) -> Result<Vec<Binding>, CliError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(bindings_from_json(&value)?)
}

/// Encode a JSON filter tree as filter text
pub fn execute_encode(options: &EncodeOptions) -> Result<String, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let value: serde_json::Value = serde_json::from_str(input)?;

    let bindings = options.bindings.as_deref().map(read_bindings).transpose()?;
    Ok(encode_json(&value, bindings.as_deref())?)
}

/// Substitute alias values into filter text
pub fn execute_rewrite(options: &RewriteOptions) -> Result<String, CliError> {
    let filter = parse(&options.filter)?;
    let bindings = read_bindings(&options.bindings)?;
    Ok(encode(&filter, Some(&bindings))?)
}
