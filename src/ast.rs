//! # OData Filter Grammar - Syntax Types
//!
//! This module defines the vocabulary shared by the lexer and the parser of
//! the `$filter` expression language.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Binary operators with their precedence, and the
//!   `any`/`all` lambda quantifiers
//! - **[functions]** - Built-in function names
//! - **expressions** - Raw syntax tree, private to the parser and the
//!   canonicalizer
//!
//! ## Quick Start
//!
//! ```text
//! Price gt 100 and contains(Name, 'corp')
//! ```
//!
//! ## Operator Precedence
//!
//! Higher binds tighter. Operators of equal precedence group left to right.
//!
//! | operator | precedence |
//! |----------|-----------:|
//! | `has`    | 150 |
//! | `in`     | 140 |
//! | `mul`    | 130 |
//! | `div`    | 120 |
//! | `mod`    | 110 |
//! | `add`    | 100 |
//! | `sub`    | 90 |
//! | `lt`     | 80 |
//! | `gt`     | 70 |
//! | `le`     | 60 |
//! | `ge`     | 50 |
//! | `eq`     | 40 |
//! | `ne`     | 30 |
//! | `and`    | 20 |
//! | `or`     | 10 |
//!
//! ## Navigation and Lambdas
//!
//! ```text
//! ShipTo/City eq 'Madrid'
//! Orders/any(o: o/Articles/all(p: p/Category eq 'Cookies'))
//! Country/City/$count gt 3
//! ```
pub mod tokens;
pub mod operators;
pub mod functions;
pub(crate) mod expressions;

pub use tokens::{Keyword, Token, TokenKind};
pub use operators::{LambdaOp, Operator};
pub use functions::Function;
pub(crate) use expressions::Expr;
