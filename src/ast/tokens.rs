use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ast::{Function, Operator};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Single-quoted string, with `''` standing for one quote
    ///
    /// # Examples
    /// ```text
    /// 'Barcelona'
    /// 'O''Neil'
    /// ```
    String(String),

    /// Signed decimal number with optional fraction and exponent
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -3.5
    /// 1e-3
    /// ```
    Number(f64),

    /// Calendar date, optionally with a UTC time of day
    ///
    /// # Examples
    /// ```text
    /// 2022-03-09
    /// 2022-03-09T23:00:00.000Z
    /// ```
    Date(DateTime<Utc>),

    /// Globally unique identifier (digits only)
    ///
    /// # Examples
    /// ```text
    /// 01234567-8901-2345-6789-012345678901
    /// ```
    Guid(String),

    // Identifiers and References
    /// Field name or lambda variable
    ///
    /// # Examples
    /// ```text
    /// Title
    /// o
    /// AGENT_FORMATPER
    /// ```
    Name(String),

    /// `$`-prefixed path literal
    ///
    /// # Examples
    /// ```text
    /// $it
    /// $count
    /// ```
    Literal(String),

    /// `@`-prefixed alias placeholder
    ///
    /// # Examples
    /// ```text
    /// @title
    /// @date_ge
    /// ```
    Alias(String),

    // Operators and keywords
    /// Binary operator word (`eq`, `and`, `add`, ...)
    Operator(Operator),

    /// Built-in function name (`contains`, `year`, ...)
    Function(Function),

    /// `not`, `true`, `false`, `null`, `NaN` or `INF`
    Keyword(Keyword),

    // Punctuation
    /// Navigation separator
    Slash,

    /// Left parenthesis for grouping, collections or calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket for collections
    LBracket,

    /// Right bracket
    RBracket,

    /// Separator for collection elements and call parameters
    Comma,

    /// Dot
    Dot,

    /// Separator between a lambda variable and its expression
    Colon,

    /// Negation
    Minus,

    /// Run of whitespace; never surfaced by the token stream
    Whitespace,

    /// End of input
    Eof,
}

/// Coarse token classification, used for checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Whitespace,
    String,
    Number,
    Date,
    Guid,
    Name,
    Literal,
    Alias,
    Punctuation,
    Operator,
    Function,
    Keyword,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Whitespace => "whitespace",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Date => "date",
            TokenKind::Guid => "guid",
            TokenKind::Name => "name",
            TokenKind::Literal => "literal",
            TokenKind::Alias => "alias",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::Keyword => "keyword",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Not,
    True,
    False,
    Null,
    NaN,
    Inf,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::Not,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::NaN,
        Keyword::Inf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Keyword::Not => "not",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::NaN => "NaN",
            Keyword::Inf => "INF",
        }
    }

    /// Keywords are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.name() == name)
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Date(_) => TokenKind::Date,
            Token::Guid(_) => TokenKind::Guid,
            Token::Name(_) => TokenKind::Name,
            Token::Literal(_) => TokenKind::Literal,
            Token::Alias(_) => TokenKind::Alias,
            Token::Operator(_) => TokenKind::Operator,
            Token::Function(_) => TokenKind::Function,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Slash
            | Token::LParen
            | Token::RParen
            | Token::LBracket
            | Token::RBracket
            | Token::Comma
            | Token::Dot
            | Token::Colon
            | Token::Minus => TokenKind::Punctuation,
            Token::Whitespace => TokenKind::Whitespace,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// Maps a punctuation character to its token.
    pub fn punctuation(ch: char) -> Option<Token> {
        match ch {
            '/' => Some(Token::Slash),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            '.' => Some(Token::Dot),
            ':' => Some(Token::Colon),
            '-' => Some(Token::Minus),
            _ => None,
        }
    }
}

/// Renders the token the way it would appear in source.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Token::Number(n) => write!(f, "{}", n),
            Token::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Token::Guid(s) | Token::Name(s) | Token::Literal(s) | Token::Alias(s) => {
                f.write_str(s)
            }
            Token::Operator(op) => write!(f, "{}", op),
            Token::Function(function) => write!(f, "{}", function),
            Token::Keyword(keyword) => f.write_str(keyword.name()),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::Comma => f.write_str(","),
            Token::Dot => f.write_str("."),
            Token::Colon => f.write_str(":"),
            Token::Minus => f.write_str("-"),
            Token::Whitespace => f.write_str(" "),
            Token::Eof => f.write_str("<eof>"),
        }
    }
}
