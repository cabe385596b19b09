use chrono::{DateTime, Utc};

use crate::ast::{Function, Keyword, LambdaOp, Operator};

/// Raw syntax tree produced by the parser.
///
/// One variant per grammar rule. It only lives between the parser and the
/// canonicalizer; callers see [`crate::Filter`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// `true` / `false`
    Boolean(bool),

    /// `null`, `NaN` or `INF`
    Constant(Keyword),

    Number(f64),

    String(String),

    Date(DateTime<Utc>),

    Guid(String),

    /// `@name`, sigil included
    Alias(String),

    /// `-atom` or `not atom`
    Negative(Box<Expr>),

    /// `name(p1, p2, ...)`
    ///
    /// # Example
    /// ```text
    /// contains(Name, 'corp')
    /// ```
    FunctionCall {
        name: Function,
        parameters: Vec<Expr>,
    },

    /// Quantifier over a navigation path
    ///
    /// # Example
    /// ```text
    /// Orders/any(o: o/Total gt 100)
    /// ```
    Lambda {
        navigation: Vec<String>,
        operation: LambdaOp,
        name: String,
        expression: Box<Expr>,
    },

    /// Field reference, optionally behind navigation segments
    ///
    /// # Example
    /// ```text
    /// $it/Address/City
    /// ```
    Property {
        navigation: Vec<String>,
        name: String,
    },

    /// Path literal, optionally behind navigation segments
    ///
    /// # Example
    /// ```text
    /// Country/City/$count
    /// ```
    Literal {
        navigation: Vec<String>,
        value: String,
    },

    BinaryOp {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Parenthesised or bracketed group, one or more elements
    Collection(Vec<Expr>),
}
