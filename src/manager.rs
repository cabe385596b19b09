//! Groups of named condition templates.
//!
//! A [`FilterManager`] holds condition templates such as `Title eq @title`
//! joined under one aggregation operator. It reads alias values out of an
//! incoming filter and writes a filter back from a set of values, leaving out
//! every template whose aliases are not all known.
//!
//! # Examples
//!
//! ```
//! use odata_filter::{Aggregation, Binding, FilterManager, Member};
//!
//! let manager = FilterManager::new(
//!     vec![
//!         Member::Text("Title eq @title".into()),
//!         Member::Text("Published gt @published".into()),
//!     ],
//!     Some(Aggregation::And),
//! )
//! .unwrap();
//!
//! let bindings = manager.read_filter("Title eq 'Dune' and Published gt 1965").unwrap();
//! assert_eq!(
//!     bindings,
//!     vec![Binding::new("title", "Dune"), Binding::new("published", 1965)]
//! );
//!
//! let text = manager.write_filter(&[Binding::new("title", "Emma")]).unwrap();
//! assert_eq!(text, "((Title eq 'Emma'))");
//! ```

use std::{fmt, ops::ControlFlow, str::FromStr};

use crate::{
    ast::Operator,
    compare::{Binding, compare},
    encode::{EncodeError, encode},
    filter::Filter,
    parser::{ParseError, parse},
    traverse::{Order, traverse},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ManagerError {
    Parse(ParseError),
    Encode(EncodeError),
    /// `read_filter` and `write_filter` need an aggregation operator
    MissingAggregation,
    InvalidAggregation(String),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::Parse(e) => write!(f, "Parse error: {}", e),
            ManagerError::Encode(e) => write!(f, "Encode error: {}", e),
            ManagerError::MissingAggregation => {
                write!(f, "No aggregation operator configured")
            }
            ManagerError::InvalidAggregation(value) => write!(
                f,
                "Invalid aggregation operator '{}': expected 'and' or 'or'",
                value
            ),
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManagerError::Parse(e) => Some(e),
            ManagerError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for ManagerError {
    fn from(e: ParseError) -> Self {
        ManagerError::Parse(e)
    }
}

impl From<EncodeError> for ManagerError {
    fn from(e: EncodeError) -> Self {
        ManagerError::Encode(e)
    }
}

/// How the members of a manager combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    And,
    Or,
}

impl Aggregation {
    pub fn operator(self) -> Operator {
        match self {
            Aggregation::And => Operator::And,
            Aggregation::Or => Operator::Or,
        }
    }
}

impl FromStr for Aggregation {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Aggregation::And),
            "or" => Ok(Aggregation::Or),
            other => Err(ManagerError::InvalidAggregation(other.to_string())),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator())
    }
}

/// One entry handed to [`FilterManager::new`].
#[derive(Debug, Clone)]
pub enum Member {
    /// Filter text, parsed on construction
    Text(String),
    Parsed(Filter),
    Group(FilterManager),
}

#[derive(Debug, Clone)]
enum Condition {
    Leaf {
        filter: Filter,
        /// Alias names without sigil, each listed once
        aliases: Vec<String>,
    },
    Group(FilterManager),
}

#[derive(Debug, Clone)]
pub struct FilterManager {
    conditions: Vec<Condition>,
    aggregation: Option<Aggregation>,
}

impl FilterManager {
    /// Fails if a text member does not parse.
    pub fn new(members: Vec<Member>, aggregation: Option<Aggregation>) -> Result<Self, ManagerError> {
        let mut conditions = Vec::with_capacity(members.len());
        for member in members {
            let condition = match member {
                Member::Text(text) => leaf(parse(&text)?),
                Member::Parsed(filter) => leaf(filter),
                Member::Group(manager) => Condition::Group(manager),
            };
            conditions.push(condition);
        }

        Ok(FilterManager {
            conditions,
            aggregation,
        })
    }

    pub fn aggregation(&self) -> Option<Aggregation> {
        self.aggregation
    }

    /// Every alias name used by a leaf of this manager or its groups.
    pub fn aliases(&self) -> Vec<&str> {
        let mut names: Vec<&str> = vec![];
        for condition in &self.conditions {
            let found = match condition {
                Condition::Leaf { aliases, .. } => aliases.iter().map(String::as_str).collect(),
                Condition::Group(group) => group.aliases(),
            };
            for name in found {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Compares `node` against every leaf template and concatenates what
    /// the matching ones capture.
    pub fn condition_values(&self, node: &Filter) -> Vec<Binding> {
        let mut bindings = vec![];
        for condition in &self.conditions {
            match condition {
                Condition::Leaf { filter, .. } => {
                    let before = bindings.len();
                    if compare(filter, node, Some(&mut bindings)) {
                        tracing::trace!(
                            "Captured {} value(s) from {}",
                            bindings.len() - before,
                            node.shape()
                        );
                    }
                }
                Condition::Group(group) => bindings.extend(group.condition_values(node)),
            }
        }
        bindings
    }

    /// Reads alias values from `text`. The filter itself and, when its root
    /// uses the aggregation operator, each of its top-level operands are
    /// matched against the templates.
    pub fn read_filter(&self, text: &str) -> Result<Vec<Binding>, ManagerError> {
        let aggregation = self.aggregation.ok_or(ManagerError::MissingAggregation)?;
        if text.is_empty() {
            return Ok(vec![]);
        }

        let root = parse(text)?;
        let mut parts = vec![&root];
        if let Filter::Operation { op, operands } = &root
            && *op == aggregation.operator()
        {
            parts.extend(operands);
        }

        Ok(parts
            .into_iter()
            .flat_map(|part| self.condition_values(part))
            .collect())
    }

    /// Reads alias values from every node of `text`, innermost first.
    pub fn find_values_in_filter(&self, text: &str) -> Result<Vec<Binding>, ManagerError> {
        let root = parse(text)?;
        let mut bindings = vec![];
        let _ = traverse(&root, Order::Post, &mut |node, _| {
            bindings.extend(self.condition_values(node));
            ControlFlow::<()>::Continue(())
        });
        Ok(bindings)
    }

    /// Encodes every template whose aliases are all bound and joins them with
    /// the aggregation operator. Empty when no template qualifies.
    pub fn write_filter(&self, bindings: &[Binding]) -> Result<String, ManagerError> {
        let aggregation = self.aggregation.ok_or(ManagerError::MissingAggregation)?;

        let mut parts = vec![];
        for condition in &self.conditions {
            match condition {
                Condition::Leaf { filter, aliases } => {
                    let missing: Vec<&String> = aliases
                        .iter()
                        .filter(|name| !bindings.iter().any(|b| &b.name == *name))
                        .collect();
                    if missing.is_empty() {
                        parts.push(encode(filter, Some(bindings))?);
                    } else {
                        tracing::debug!("Skipping {} condition: unbound {:?}", filter.shape(), missing);
                    }
                }
                Condition::Group(group) => {
                    let text = group.write_filter(bindings)?;
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
        }

        if parts.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("({})", parts.join(&format!(" {} ", aggregation))))
    }
}

fn leaf(filter: Filter) -> Condition {
    let mut aliases: Vec<String> = vec![];
    let _ = traverse(&filter, Order::Post, &mut |node, _| {
        if let Some(name) = node.alias_name()
            && !aliases.iter().any(|known| known == name)
        {
            aliases.push(name.to_string());
        }
        ControlFlow::<()>::Continue(())
    });
    Condition::Leaf { filter, aliases }
}
