use std::{fmt, mem};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    ast::{Function, Keyword, Operator, Token, TokenKind},
    parser::ParseError,
};

static LITERAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$[a-zA-Z][a-zA-Z0-9_]+").expect("literal pattern"));

static ALIAS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[a-zA-Z][a-zA-Z0-9_]+").expect("alias pattern"));

static GUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{8}-[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{12}").expect("guid pattern")
});

// Groups: year, month, day, then optional hour, minute, second, fraction.
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-(0?[0-9]|1[012])-([0123]?[0-9]|3[01])",
        r"(?:T([01]?[0-9]|2[0-3]):([0-5]?[0-9])(?::([0-5]?[0-9])(?:\.([0-9]{1,12}))?)?Z)?",
    ))
    .expect("date pattern")
});

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?(?:e-?[0-9]+)?").expect("number pattern")
});

static OPERATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = Operator::ALL.iter().map(|op| op.name()).collect();
    Regex::new(&format!(r"^(?i:{})\b", names.join("|"))).expect("operator pattern")
});

static FUNCTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = Function::ALL.iter().map(|function| function.name()).collect();
    Regex::new(&format!(r"^(?i:{})\b", names.join("|"))).expect("function pattern")
});

static KEYWORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = Keyword::ALL.iter().map(|keyword| keyword.name()).collect();
    Regex::new(&format!(r"^(?:{})\b", names.join("|"))).expect("keyword pattern")
});

/// Half-open range of character offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

/// A token together with where it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

impl Lexeme {
    pub fn new(token: Token, span: Span) -> Self {
        Lexeme { token, span }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

/// A character sequence that no token class accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        LexError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Starting at position {} and ending at {}.",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset into `input`
    position: usize,
    /// Character offset, reported in spans
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            offset: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn find(&self, regex: &Regex) -> Option<&'a str> {
        regex.find(self.rest()).map(|m| m.as_str())
    }

    /// Moves past `text`, which must be a prefix of the remaining input.
    fn consume(&mut self, text: &str) -> Span {
        let start = self.offset;
        self.position += text.len();
        self.offset += text.chars().count();
        Span::new(start, self.offset)
    }

    fn read_whitespace(&mut self) -> Lexeme {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        let span = self.consume(&rest[..end]);
        Lexeme::new(Token::Whitespace, span)
    }

    fn read_prefixed(
        &mut self,
        regex: &Regex,
        token: fn(String) -> Token,
        what: &str,
    ) -> Result<Lexeme, LexError> {
        match self.find(regex) {
            Some(text) => {
                let span = self.consume(text);
                Ok(Lexeme::new(token(text.to_string()), span))
            }
            None => Err(LexError::new(
                format!("Invalid {}: expected at least two name characters", what),
                Span::new(self.offset, self.offset + 1),
            )),
        }
    }

    fn read_date(&mut self, captures: Captures<'a>) -> Result<Lexeme, LexError> {
        let text = captures.get(0).map_or("", |m| m.as_str());
        let start = self.offset;
        let invalid = || {
            LexError::new(
                format!("Invalid date '{}'", text),
                Span::new(start, start + text.chars().count()),
            )
        };

        let number = |index: usize| -> Result<u32, LexError> {
            captures
                .get(index)
                .map_or(Ok(0), |m| m.as_str().parse::<u32>())
                .map_err(|_| invalid())
        };

        let year = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?).ok_or_else(invalid)?;

        // Millisecond precision; further digits are dropped.
        let nanos = match captures.get(7) {
            Some(fraction) => {
                let digits: String = fraction.as_str().chars().take(3).collect();
                format!("{:0<9}", digits).parse::<u32>().map_err(|_| invalid())?
            }
            None => 0,
        };
        let time = NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos)
            .ok_or_else(invalid)?;

        let span = self.consume(text);
        Ok(Lexeme::new(
            Token::Date(NaiveDateTime::new(date, time).and_utc()),
            span,
        ))
    }

    fn read_number(&mut self, text: &str) -> Result<Lexeme, LexError> {
        let start = self.offset;
        let value = text.parse::<f64>().map_err(|_| {
            LexError::new(
                format!("Invalid number '{}'", text),
                Span::new(start, start + text.chars().count()),
            )
        })?;
        let span = self.consume(text);
        Ok(Lexeme::new(Token::Number(value), span))
    }

    /// Single-quoted string; `''` is an escaped quote.
    fn read_string(&mut self) -> Result<Lexeme, LexError> {
        let rest = self.rest();
        let mut value = String::new();
        let mut chars = rest.char_indices().skip(1).peekable();

        while let Some((index, ch)) = chars.next() {
            if ch != '\'' {
                value.push(ch);
                continue;
            }

            if matches!(chars.peek(), Some(&(_, '\''))) {
                chars.next();
                value.push('\'');
            } else {
                let span = self.consume(&rest[..index + 1]);
                return Ok(Lexeme::new(Token::String(value), span));
            }
        }

        Err(LexError::new(
            "Unclosed string",
            Span::new(self.offset, self.offset + rest.chars().count()),
        ))
    }

    /// Reads the next token, whitespace included.
    ///
    /// Token classes are tried in a fixed order and the first that accepts
    /// the input wins: GUIDs before dates before numbers, operators before
    /// functions before keywords before plain names.
    pub fn read_token(&mut self) -> Result<Lexeme, LexError> {
        let Some(ch) = self.current_char() else {
            return Ok(Lexeme::new(Token::Eof, Span::new(self.offset, self.offset)));
        };

        if ch.is_whitespace() {
            return Ok(self.read_whitespace());
        }

        match ch {
            '$' => return self.read_prefixed(&LITERAL_REGEX, Token::Literal, "path literal"),
            '@' => return self.read_prefixed(&ALIAS_REGEX, Token::Alias, "alias"),
            _ => {}
        }

        if let Some(text) = self.find(&GUID_REGEX) {
            let span = self.consume(text);
            return Ok(Lexeme::new(Token::Guid(text.to_string()), span));
        }

        if let Some(captures) = DATE_REGEX.captures(self.rest()) {
            return self.read_date(captures);
        }

        if let Some(text) = self.find(&NUMBER_REGEX) {
            return self.read_number(text);
        }

        if let Some(token) = Token::punctuation(ch) {
            let span = Span::new(self.offset, self.offset + 1);
            self.position += ch.len_utf8();
            self.offset += 1;
            return Ok(Lexeme::new(token, span));
        }

        if ch == '\'' {
            return self.read_string();
        }

        if let Some((text, op)) = self
            .find(&OPERATOR_REGEX)
            .and_then(|text| Operator::from_name(text).map(|op| (text, op)))
        {
            let span = self.consume(text);
            return Ok(Lexeme::new(Token::Operator(op), span));
        }

        if let Some((text, function)) = self
            .find(&FUNCTION_REGEX)
            .and_then(|text| Function::from_name(text).map(|function| (text, function)))
        {
            let span = self.consume(text);
            return Ok(Lexeme::new(Token::Function(function), span));
        }

        if let Some((text, keyword)) = self
            .find(&KEYWORD_REGEX)
            .and_then(|text| Keyword::from_name(text).map(|keyword| (text, keyword)))
        {
            let span = self.consume(text);
            return Ok(Lexeme::new(Token::Keyword(keyword), span));
        }

        if ch.is_ascii_alphabetic() {
            let rest = self.rest();
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let name = &rest[..end];
            let span = self.consume(name);
            return Ok(Lexeme::new(Token::Name(name.to_string()), span));
        }

        Err(LexError::new(
            format!("Unexpected character '{}'", ch),
            Span::new(self.offset, self.offset + 1),
        ))
    }

    /// Reads the next significant token.
    pub fn next_token(&mut self) -> Result<Lexeme, LexError> {
        loop {
            let lexeme = self.read_token()?;
            if lexeme.token != Token::Whitespace {
                return Ok(lexeme);
            }
        }
    }
}

/// Lexes `source` lazily, keeping the current token and one token of
/// lookahead.
pub fn tokenize(source: &str) -> Result<TokenStream<'_>, ParseError> {
    TokenStream::new(Lexer::new(source))
}

pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    current: Lexeme,
    next: Lexeme,
}

impl<'a> TokenStream<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        let next = lexer.next_token()?;
        Ok(TokenStream {
            lexer,
            current,
            next,
        })
    }

    pub fn current(&self) -> &Lexeme {
        &self.current
    }

    /// The token after `current`.
    pub fn peek(&self) -> &Lexeme {
        &self.next
    }

    /// Is the current token of one of `kinds`?
    pub fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind())
    }

    /// Is the current token exactly `token`?
    pub fn check_token(&self, token: &Token) -> bool {
        self.current.token == *token
    }

    /// Is the lookahead token exactly `token`?
    pub fn peek_is(&self, token: &Token) -> bool {
        self.next.token == *token
    }

    /// Moves one token forward and returns the token that was current.
    pub fn advance(&mut self) -> Result<Lexeme, ParseError> {
        let following = self.lexer.next_token()?;
        let next = mem::replace(&mut self.next, following);
        Ok(mem::replace(&mut self.current, next))
    }

    /// Consumes the current token if it is `expected`, fails otherwise.
    pub fn expect(&mut self, expected: &Token) -> Result<Lexeme, ParseError> {
        if !self.check_token(expected) {
            return Err(self.unexpected(format!(
                "Expected '{}', but found {}",
                expected,
                describe(&self.current.token)
            )));
        }
        self.advance()
    }

    /// Consumes the current token if it is of one of `kinds`, fails otherwise.
    pub fn expect_kind(&mut self, kinds: &[TokenKind]) -> Result<Lexeme, ParseError> {
        if !self.check(kinds) {
            let expected: Vec<String> = kinds.iter().map(|kind| kind.to_string()).collect();
            return Err(self.unexpected(format!(
                "Expected a token of type {}, but found {}",
                expected.join(" or "),
                describe(&self.current.token)
            )));
        }
        self.advance()
    }

    /// Consumes the current token only if it is `token`.
    pub fn advance_if(&mut self, token: &Token) -> Result<Option<Lexeme>, ParseError> {
        if self.check_token(token) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Syntax error pointing at the current token.
    pub fn unexpected(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            kind: self.current.kind(),
            value: self.current.token.to_string(),
            span: self.current.span,
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Eof => "end of input".to_string(),
        token => format!("{} '{}'", token.kind(), token),
    }
}

#[test]
fn test_operators_before_names() {
    let mut lexer = Lexer::new("Price GT 5 and equals");
    assert_eq!(lexer.next_token().unwrap().token, Token::Name("Price".into()));
    assert_eq!(lexer.next_token().unwrap().token, Token::Operator(Operator::Gt));
    assert_eq!(lexer.next_token().unwrap().token, Token::Number(5.0));
    assert_eq!(lexer.next_token().unwrap().token, Token::Operator(Operator::And));
    assert_eq!(lexer.next_token().unwrap().token, Token::Name("equals".into()));
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}

#[test]
fn test_whitespace_is_a_token() {
    let mut lexer = Lexer::new("  x");
    let whitespace = lexer.read_token().unwrap();
    assert_eq!(whitespace.token, Token::Whitespace);
    assert_eq!(whitespace.span, Span::new(0, 2));
    assert_eq!(lexer.read_token().unwrap().span, Span::new(2, 3));
}
