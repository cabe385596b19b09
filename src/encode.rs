//! Canonical [`Filter`] back to filter text.
//!
//! The output is fully parenthesised: every operator node is wrapped in
//! `( )`, so precedence never has to be reconstructed and the text parses
//! back to an equal tree.
//!
//! # Examples
//!
//! ```
//! use odata_filter::{encode, parse, Binding};
//!
//! let filter = parse("Value eq @limit").unwrap();
//! assert_eq!(encode(&filter, None).unwrap(), "(Value eq @limit)");
//!
//! let bindings = [Binding::new("limit", 5)];
//! assert_eq!(encode(&filter, Some(&bindings)).unwrap(), "(Value eq 5)");
//! ```

use std::fmt;

use chrono::SecondsFormat;

use crate::{compare::Binding, filter::Filter};

/// A filter node that has no textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    UnrecognizedFilter(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnrecognizedFilter(detail) => {
                write!(f, "Unrecognized filter: {}", detail)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

pub struct Encoder<'a> {
    bindings: Option<&'a [Binding]>,
    /// Aliases currently being substituted, innermost last
    resolving: Vec<&'a str>,
}

impl<'a> Encoder<'a> {
    pub fn new(bindings: Option<&'a [Binding]>) -> Self {
        Encoder {
            bindings,
            resolving: vec![],
        }
    }

    pub fn encode(&self, filter: &Filter) -> Result<String, EncodeError> {
        match filter {
            Filter::Null => Ok("null".to_string()),
            Filter::Boolean(b) => Ok(b.to_string()),
            Filter::Number(n) => Ok(self.encode_number(*n)),
            Filter::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
            Filter::Date(date) => Ok(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Filter::Collection(elements) => {
                let parts = self.encode_all(elements)?;
                Ok(format!("({})", parts.join(",")))
            }
            Filter::Guid(text) => raw("guid", text),
            Filter::Property(text) => raw("property", text),
            Filter::Literal(text) => raw("literal", text),
            Filter::Alias(alias) => self.encode_alias(filter, alias),
            Filter::Not(operand) => {
                let inner = self.encode(operand)?;
                // A digit right after '-' would lex as a signed number.
                if inner.starts_with(|c: char| c.is_ascii_digit()) {
                    Ok(format!("-({})", inner))
                } else {
                    Ok(format!("-{}", inner))
                }
            }
            Filter::Operation { op, operands } => {
                let arity_ok = if op.is_associative() {
                    operands.len() >= 2
                } else {
                    operands.len() == 2
                };
                if !arity_ok {
                    return Err(EncodeError::UnrecognizedFilter(format!(
                        "'{}' with {} operand(s)",
                        op,
                        operands.len()
                    )));
                }
                let parts = self.encode_all(operands)?;
                Ok(format!("({})", parts.join(&format!(" {} ", op))))
            }
            Filter::Function { name, args } => {
                let parts = self.encode_all(args)?;
                Ok(format!("{}({})", name, parts.join(", ")))
            }
            Filter::Lambda {
                op,
                path,
                name,
                expression,
            } => {
                if name.is_empty() {
                    return Err(EncodeError::UnrecognizedFilter(format!(
                        "'{}' lambda without a variable",
                        op
                    )));
                }
                let body = self.encode(expression)?;
                match path {
                    Some(path) => Ok(format!("{}/{}({}:{})", path, op, name, body)),
                    None => Ok(format!("{}({}:{})", op, name, body)),
                }
            }
        }
    }

    fn encode_all(&self, filters: &[Filter]) -> Result<Vec<String>, EncodeError> {
        filters.iter().map(|filter| self.encode(filter)).collect()
    }

    fn encode_number(&self, n: f64) -> String {
        if n.is_nan() {
            "NaN".to_string()
        } else if n == f64::INFINITY {
            "INF".to_string()
        } else if n == f64::NEG_INFINITY {
            // Reads back as the negation of INF.
            "-INF".to_string()
        } else {
            n.to_string()
        }
    }

    /// Bound aliases are replaced by their value. An alias whose value
    /// refers back to itself is written as is.
    fn encode_alias(&self, filter: &Filter, alias: &str) -> Result<String, EncodeError> {
        if alias.is_empty() {
            return Err(EncodeError::UnrecognizedFilter("empty alias".to_string()));
        }

        let name = filter.alias_name().unwrap_or(alias);
        let bound = self
            .bindings
            .and_then(|bindings| bindings.iter().find(|binding| binding.name == name));

        match bound {
            Some(binding) if !self.resolving.contains(&binding.name.as_str()) => {
                let mut nested = Encoder {
                    bindings: self.bindings,
                    resolving: self.resolving.clone(),
                };
                nested.resolving.push(binding.name.as_str());
                nested.encode(&binding.value)
            }
            _ => Ok(alias.to_string()),
        }
    }
}

fn raw(what: &str, text: &str) -> Result<String, EncodeError> {
    if text.is_empty() {
        return Err(EncodeError::UnrecognizedFilter(format!("empty {}", what)));
    }
    Ok(text.to_string())
}

/// Renders `filter` as filter text, substituting bound aliases.
pub fn encode(filter: &Filter, bindings: Option<&[Binding]>) -> Result<String, EncodeError> {
    Encoder::new(bindings).encode(filter)
}
