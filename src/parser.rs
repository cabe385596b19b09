use std::fmt;

use crate::{
    ast::{Expr, Keyword, LambdaOp, Token, TokenKind},
    canonicalize::canonicalize,
    filter::Filter,
    lexer::{LexError, Lexeme, Span, TokenStream, tokenize},
};

/// Errors raised while turning filter text into a [`Filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No token class accepts the input at some offset
    Lexical(LexError),

    /// A token of the wrong kind or value, or a dangling navigation,
    /// lambda or function form
    Syntax {
        message: String,
        kind: TokenKind,
        value: String,
        span: Span,
    },
}

impl ParseError {
    fn at(lexeme: &Lexeme, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            message: message.into(),
            kind: lexeme.kind(),
            value: lexeme.token.to_string(),
            span: lexeme.span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Lexical(e) => &e.message,
            ParseError::Syntax { message, .. } => message,
        }
    }

    /// Character offsets of the offending input.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexical(e) => e.span,
            ParseError::Syntax { span, .. } => *span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical(e) => write!(f, "{}", e),
            ParseError::Syntax { message, span, .. } => write!(
                f,
                "{}. Starting at position {} and ending at {}.",
                message, span.start, span.end
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lexical(e) => Some(e),
            ParseError::Syntax { .. } => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lexical(e)
    }
}

/// Parses filter text into its canonical form.
///
/// # Examples
///
/// ```
/// use odata_filter::{parse, Filter, Operator};
///
/// let filter = parse("Quantity gt 100").unwrap();
/// assert_eq!(
///     filter,
///     Filter::operation(Operator::Gt, vec![Filter::property("Quantity"), Filter::from(100)])
/// );
/// ```
pub fn parse(text: &str) -> Result<Filter, ParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse()?;
    Ok(canonicalize(expr))
}

/// Recursive-descent parser with precedence climbing for binary operators.
pub(crate) struct Parser<'a> {
    tokens: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenStream<'a>) -> Self {
        Parser { tokens }
    }

    /// Parses one expression and requires the input to end there.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.tokens.expect(&Token::Eof)?;
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let atom = self.parse_atom()?;
        self.maybe_binary_op(atom, 0)
    }

    /// Folds `left` with every following operator that binds tighter than
    /// `min_precedence`. The right operand is parsed at the operator's own
    /// precedence, so equal operators group to the left.
    fn maybe_binary_op(&mut self, mut left: Expr, min_precedence: u8) -> Result<Expr, ParseError> {
        loop {
            let op = match self.tokens.current().token {
                Token::Operator(op) if op.precedence() > min_precedence => op,
                _ => break,
            };

            self.tokens.advance()?;
            let atom = self.parse_atom()?;
            let right = self.maybe_binary_op(atom, op.precedence())?;

            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// `open expression (',' expression)* close`
    fn parse_group(&mut self, close: &Token) -> Result<Expr, ParseError> {
        self.tokens.advance()?; // consume '(' or '['

        let mut elements = vec![self.parse_expression()?];
        while self.tokens.advance_if(&Token::Comma)?.is_some() {
            elements.push(self.parse_expression()?);
        }

        self.tokens.expect(close)?;
        Ok(Expr::Collection(elements))
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.tokens.current().token.clone();

        match token {
            Token::LParen => self.parse_group(&Token::RParen),
            Token::LBracket => self.parse_group(&Token::RBracket),

            // Literals
            Token::Keyword(Keyword::True) => {
                self.tokens.advance()?;
                Ok(Expr::Boolean(true))
            }
            Token::Keyword(Keyword::False) => {
                self.tokens.advance()?;
                Ok(Expr::Boolean(false))
            }
            Token::Keyword(constant @ (Keyword::Null | Keyword::NaN | Keyword::Inf)) => {
                self.tokens.advance()?;
                Ok(Expr::Constant(constant))
            }
            Token::Date(date) => {
                self.tokens.advance()?;
                Ok(Expr::Date(date))
            }
            Token::Number(n) => {
                self.tokens.advance()?;
                Ok(Expr::Number(n))
            }
            Token::Guid(guid) => {
                self.tokens.advance()?;
                Ok(Expr::Guid(guid))
            }
            Token::String(s) => {
                self.tokens.advance()?;
                Ok(Expr::String(s))
            }
            Token::Alias(alias) => {
                self.tokens.advance()?;
                Ok(Expr::Alias(alias))
            }

            // '-' and 'not' share one node
            Token::Minus | Token::Keyword(Keyword::Not) => {
                self.tokens.advance()?;
                let operand = self.parse_atom()?;
                Ok(Expr::Negative(Box::new(operand)))
            }

            Token::Function(_) => self.parse_function_call(),
            Token::Name(_) | Token::Literal(_) => self.parse_navigation(),

            token => Err(self
                .tokens
                .unexpected(format!("Unexpected token {}", token.kind()))),
        }
    }

    /// `FUNCTION '(' (atom ',')* atom? ')'`
    fn parse_function_call(&mut self) -> Result<Expr, ParseError> {
        let lexeme = self.tokens.advance()?;
        let Token::Function(name) = lexeme.token else {
            return Err(ParseError::at(&lexeme, "Expected a function name"));
        };

        self.tokens.expect(&Token::LParen)?;

        let mut parameters = vec![];
        while !self.tokens.check(&[TokenKind::Eof]) && !self.tokens.check_token(&Token::RParen) {
            if !parameters.is_empty() {
                self.tokens.expect(&Token::Comma)?;
            }
            parameters.push(self.parse_atom()?);
        }

        self.tokens.expect(&Token::RParen)?;
        Ok(Expr::FunctionCall { name, parameters })
    }

    /// `((NAME|LITERAL) '/')* (NAME | LITERAL | ('any'|'all') '(' NAME ':' expression ')')`
    fn parse_navigation(&mut self) -> Result<Expr, ParseError> {
        let mut navigation = vec![];

        while self.tokens.check(&[TokenKind::Name, TokenKind::Literal])
            && self.tokens.peek_is(&Token::Slash)
        {
            navigation.push(self.expect_text(&[TokenKind::Name, TokenKind::Literal])?);
            self.tokens.expect(&Token::Slash)?;
        }

        if let Token::Name(name) = &self.tokens.current().token
            && let Some(operation) = LambdaOp::from_name(name)
            && self.tokens.peek_is(&Token::LParen)
        {
            self.tokens.advance()?; // consume 'any' / 'all'
            self.tokens.expect(&Token::LParen)?;
            let name = self.expect_text(&[TokenKind::Name])?;
            self.tokens.expect(&Token::Colon)?;
            let expression = self.parse_expression()?;
            self.tokens.expect(&Token::RParen)?;

            return Ok(Expr::Lambda {
                navigation,
                operation,
                name,
                expression: Box::new(expression),
            });
        }

        match self.tokens.current().kind() {
            TokenKind::Name => {
                let name = self.expect_text(&[TokenKind::Name])?;
                Ok(Expr::Property { navigation, name })
            }
            TokenKind::Literal => {
                let value = self.expect_text(&[TokenKind::Literal])?;
                Ok(Expr::Literal { navigation, value })
            }
            kind => Err(self.tokens.unexpected(format!("Unexpected token {}", kind))),
        }
    }

    /// Consumes a name or literal token and returns its text.
    fn expect_text(&mut self, kinds: &[TokenKind]) -> Result<String, ParseError> {
        let lexeme = self.tokens.expect_kind(kinds)?;
        match lexeme.token {
            Token::Name(text) | Token::Literal(text) => Ok(text),
            _ => Err(ParseError::at(&lexeme, "Expected a name")),
        }
    }
}
