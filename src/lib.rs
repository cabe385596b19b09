pub mod ast;
mod canonicalize;
pub mod compare;
pub mod encode;
pub mod filter;
pub mod json;
pub mod lexer;
pub mod manager;
pub mod parser;
pub mod traverse;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Function, Keyword, LambdaOp, Operator, Token, TokenKind};
pub use compare::{Binding, compare};
pub use encode::{EncodeError, Encoder, encode};
pub use filter::Filter;
pub use json::{bindings_from_json, bindings_to_json, encode_json, from_json, to_json};
pub use lexer::{LexError, Lexeme, Lexer, Span, TokenStream, tokenize};
pub use manager::{Aggregation, FilterManager, ManagerError, Member};
pub use parser::{ParseError, parse};
pub use traverse::{Order, PathSegment, traverse};
