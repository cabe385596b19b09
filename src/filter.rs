use chrono::{DateTime, Utc};

use crate::ast::{Function, LambdaOp, Operator};

/// Canonical form of a filter expression.
///
/// Produced by [`crate::parse`], compared with [`crate::compare`] and turned
/// back into text with [`crate::encode`]. Values are plain data: no node
/// points back to its source text or to its parent.
///
/// # Shape rules
///
/// - Chains of one associative operator (`and`, `or`, `add`, `sub`, `mul`,
///   `div`) are a single [`Filter::Operation`] with two or more operands, in
///   source order. Every other operator has exactly two operands.
/// - A group with one element collapses to that element, except a lone
///   literal written in expression position (`x in (2)` keeps `[2]`).
///
/// # Examples
///
/// ```
/// use odata_filter::{Filter, Operator};
///
/// // Title eq @title
/// let condition = Filter::operation(
///     Operator::Eq,
///     vec![Filter::property("Title"), Filter::alias("@title")],
/// );
/// assert!(condition.is_operation(Operator::Eq));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    // Leaves
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Number, `NaN` and `INF` included
    Number(f64),

    /// String literal, unquoted
    String(String),

    /// Date-time instant
    Date(DateTime<Utc>),

    /// Ordered group of values
    ///
    /// # Example
    /// ```text
    /// (2, 3, 5, 7)
    /// ```
    Collection(Vec<Filter>),

    // Tagged nodes
    /// Unique identifier, as written
    Guid(String),

    /// Placeholder, sigil included (`@title`)
    ///
    /// Matches any value during comparison and records what it matched.
    Alias(String),

    /// Field reference, navigation joined with `/`
    ///
    /// # Examples
    /// ```text
    /// Title
    /// $it/Address/City
    /// ```
    Property(String),

    /// Path literal, navigation joined with `/`
    ///
    /// # Example
    /// ```text
    /// Country/City/$count
    /// ```
    Literal(String),

    /// Negation (`-x` or `not x`)
    Not(Box<Filter>),

    /// Binary operator applied to its operands
    Operation {
        op: Operator,
        operands: Vec<Filter>,
    },

    /// Built-in function call
    Function {
        name: Function,
        args: Vec<Filter>,
    },

    /// `path/any(name: expression)` or `path/all(name: expression)`
    Lambda {
        op: LambdaOp,
        path: Option<String>,
        name: String,
        expression: Box<Filter>,
    },
}

impl Filter {
    pub fn property(name: impl Into<String>) -> Self {
        Filter::Property(name.into())
    }

    pub fn literal(path: impl Into<String>) -> Self {
        Filter::Literal(path.into())
    }

    /// `name` is stored as given; callers normally include the `@`.
    pub fn alias(name: impl Into<String>) -> Self {
        Filter::Alias(name.into())
    }

    pub fn guid(value: impl Into<String>) -> Self {
        Filter::Guid(value.into())
    }

    pub fn not(operand: Filter) -> Self {
        Filter::Not(Box::new(operand))
    }

    pub fn operation(op: Operator, operands: Vec<Filter>) -> Self {
        Filter::Operation { op, operands }
    }

    pub fn function(name: Function, args: Vec<Filter>) -> Self {
        Filter::Function { name, args }
    }

    pub fn lambda(
        op: LambdaOp,
        path: Option<&str>,
        name: impl Into<String>,
        expression: Filter,
    ) -> Self {
        Filter::Lambda {
            op,
            path: path.map(str::to_string),
            name: name.into(),
            expression: Box::new(expression),
        }
    }

    /// Is this an operator node of `op`?
    pub fn is_operation(&self, op: Operator) -> bool {
        matches!(self, Filter::Operation { op: own, .. } if *own == op)
    }

    /// Alias name without its sigil, if this is an alias node.
    pub fn alias_name(&self) -> Option<&str> {
        match self {
            Filter::Alias(alias) => Some(alias.strip_prefix('@').unwrap_or(alias)),
            _ => None,
        }
    }

    /// Human-readable shape name.
    pub fn shape(&self) -> &'static str {
        match self {
            Filter::Null => "null",
            Filter::Boolean(_) => "boolean",
            Filter::Number(_) => "number",
            Filter::String(_) => "string",
            Filter::Date(_) => "date",
            Filter::Collection(_) => "collection",
            Filter::Guid(_) => "guid",
            Filter::Alias(_) => "alias",
            Filter::Property(_) => "property",
            Filter::Literal(_) => "literal",
            Filter::Not(_) => "not",
            Filter::Operation { .. } => "operation",
            Filter::Function { .. } => "function",
            Filter::Lambda { .. } => "lambda",
        }
    }
}

impl From<bool> for Filter {
    fn from(value: bool) -> Self {
        Filter::Boolean(value)
    }
}

impl From<f64> for Filter {
    fn from(value: f64) -> Self {
        Filter::Number(value)
    }
}

impl From<i32> for Filter {
    fn from(value: i32) -> Self {
        Filter::Number(f64::from(value))
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::String(value.to_string())
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::String(value)
    }
}

impl From<DateTime<Utc>> for Filter {
    fn from(value: DateTime<Utc>) -> Self {
        Filter::Date(value)
    }
}

impl From<Vec<Filter>> for Filter {
    fn from(values: Vec<Filter>) -> Self {
        Filter::Collection(values)
    }
}
