// tests/lexer_tests.rs

use chrono::{TimeZone, Utc};
use odata_filter::ast::{Function, Keyword, Operator, Token, TokenKind};
use odata_filter::lexer::{Lexer, Span, tokenize};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut result = vec![];
    loop {
        let lexeme = lexer.next_token().unwrap();
        if lexeme.token == Token::Eof {
            return result;
        }
        result.push(lexeme.token);
    }
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_punctuation_tokens() {
    let test_cases = vec![
        ("/", Token::Slash),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
        (".", Token::Dot),
        (":", Token::Colon),
        ("-", Token::Minus),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let lexeme = lexer.next_token().unwrap();
        assert_eq!(lexeme.token, expected, "Failed for input: {}", input);
        assert_eq!(lexeme.kind(), TokenKind::Punctuation);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_eof_span_is_at_end() {
    let mut lexer = Lexer::new("ab ");
    lexer.next_token().unwrap();
    let eof = lexer.next_token().unwrap();
    assert_eq!(eof.token, Token::Eof);
    assert_eq!(eof.span, Span::new(3, 3));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec![
        ("0", 0.0),
        ("42", 42.0),
        ("-7", -7.0),
        ("3.25", 3.25),
        ("1e3", 1000.0),
        ("25e-1", 2.5),
        ("250000000", 250000000.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(tokens(input), vec![Token::Number(expected)], "Failed for input: {}", input);
    }
}

#[test]
fn test_minus_before_name_is_punctuation() {
    assert_eq!(
        tokens("-Price"),
        vec![Token::Minus, Token::Name("Price".into())]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_literals() {
    assert_eq!(tokens("'corp'"), vec![Token::String("corp".into())]);
    assert_eq!(tokens("''"), vec![Token::String("".into())]);
    assert_eq!(tokens("'O''Neil'"), vec![Token::String("O'Neil".into())]);
    assert_eq!(tokens("'a b  c'"), vec![Token::String("a b  c".into())]);
}

#[test]
fn test_unclosed_string_is_an_error() {
    let mut lexer = Lexer::new("Name eq 'corp");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.message, "Unclosed string");
    assert_eq!(err.span, Span::new(8, 13));
}

// ============================================================================
// Dates and GUIDs
// ============================================================================

#[test]
fn test_date_time() {
    let expected = Utc.with_ymd_and_hms(2022, 3, 9, 23, 0, 0).unwrap();
    assert_eq!(tokens("2022-03-09T23:00:00.000Z"), vec![Token::Date(expected)]);
    assert_eq!(tokens("2022-03-09T23:00:00Z"), vec![Token::Date(expected)]);
    assert_eq!(tokens("2022-03-09T23:00Z"), vec![Token::Date(expected)]);
}

#[test]
fn test_date_without_time_is_midnight() {
    let expected = Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap();
    assert_eq!(tokens("2021-01-05"), vec![Token::Date(expected)]);
    assert_eq!(tokens("2021-1-5"), vec![Token::Date(expected)]);
}

#[test]
fn test_date_keeps_milliseconds() {
    let lexeme = Lexer::new("2022-03-09T23:00:00.250Z").next_token().unwrap();
    let Token::Date(date) = lexeme.token else {
        panic!("expected a date, got {:?}", lexeme.token);
    };
    assert_eq!(date.timestamp_subsec_millis(), 250);
}

#[test]
fn test_date_fraction_truncated_to_milliseconds() {
    let lexeme = Lexer::new("2022-03-09T23:00:00.123456789Z").next_token().unwrap();
    let Token::Date(date) = lexeme.token else {
        panic!("expected a date, got {:?}", lexeme.token);
    };
    assert_eq!(date.timestamp_subsec_nanos(), 123_000_000);
    assert_eq!(lexeme.span, Span::new(0, 30));
}

#[test]
fn test_impossible_date_is_an_error() {
    let err = Lexer::new("2022-02-30").next_token().unwrap_err();
    assert!(err.message.contains("Invalid date"));
    assert_eq!(err.span, Span::new(0, 10));
}

#[test]
fn test_guid() {
    assert_eq!(
        tokens("01234567-8901-2345-6789-012345678901"),
        vec![Token::Guid("01234567-8901-2345-6789-012345678901".into())]
    );
}

// ============================================================================
// Operators, Functions and Keywords
// ============================================================================

#[test]
fn test_every_operator() {
    for op in Operator::ALL {
        assert_eq!(tokens(op.name()), vec![Token::Operator(op)], "Failed for {}", op);
    }
}

#[test]
fn test_operators_are_case_insensitive() {
    assert_eq!(tokens("EQ"), vec![Token::Operator(Operator::Eq)]);
    assert_eq!(tokens("And"), vec![Token::Operator(Operator::And)]);
}

#[test]
fn test_every_function() {
    for function in Function::ALL {
        assert_eq!(
            tokens(function.name()),
            vec![Token::Function(function)],
            "Failed for {}",
            function
        );
    }
}

#[test]
fn test_function_names_normalise() {
    assert_eq!(tokens("MATCHESPATTERN"), vec![Token::Function(Function::MatchesPattern)]);
    assert_eq!(tokens("ToLower"), vec![Token::Function(Function::ToLower)]);
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(tokens("true"), vec![Token::Keyword(Keyword::True)]);
    assert_eq!(tokens("NaN"), vec![Token::Keyword(Keyword::NaN)]);
    assert_eq!(tokens("INF"), vec![Token::Keyword(Keyword::Inf)]);
    assert_eq!(tokens("True"), vec![Token::Name("True".into())]);
    assert_eq!(tokens("inf"), vec![Token::Name("inf".into())]);
}

#[test]
fn test_word_prefixes_stay_names() {
    assert_eq!(tokens("order"), vec![Token::Name("order".into())]);
    assert_eq!(tokens("notes"), vec![Token::Name("notes".into())]);
    assert_eq!(tokens("year_2"), vec![Token::Name("year_2".into())]);
    assert_eq!(tokens("indexof"), vec![Token::Function(Function::IndexOf)]);
}

// ============================================================================
// Names, Literals and Aliases
// ============================================================================

#[test]
fn test_navigation_tokens() {
    assert_eq!(
        tokens("$it/Address/City"),
        vec![
            Token::Literal("$it".into()),
            Token::Slash,
            Token::Name("Address".into()),
            Token::Slash,
            Token::Name("City".into()),
        ]
    );
}

#[test]
fn test_alias() {
    assert_eq!(tokens("@date_ge"), vec![Token::Alias("@date_ge".into())]);
}

#[test]
fn test_short_alias_is_an_error() {
    let err = Lexer::new("@a").next_token().unwrap_err();
    assert!(err.message.contains("alias"));
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("Price # 5");
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.message, "Unexpected character '#'");
    assert_eq!(err.span, Span::new(6, 7));
    assert_eq!(
        err.to_string(),
        "Unexpected character '#'. Starting at position 6 and ending at 7."
    );
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_spans_count_characters() {
    let mut lexer = Lexer::new("'ñu' eq Name");
    assert_eq!(lexer.next_token().unwrap().span, Span::new(0, 4));
    assert_eq!(lexer.next_token().unwrap().span, Span::new(5, 7));
    assert_eq!(lexer.next_token().unwrap().span, Span::new(8, 12));
}

// ============================================================================
// Token Stream
// ============================================================================

#[test]
fn test_stream_lookahead() {
    let mut stream = tokenize("Title eq @title").unwrap();
    assert_eq!(stream.current().token, Token::Name("Title".into()));
    assert!(stream.peek_is(&Token::Operator(Operator::Eq)));
    assert!(stream.check(&[TokenKind::Name, TokenKind::Literal]));

    stream.advance().unwrap();
    assert!(stream.check_token(&Token::Operator(Operator::Eq)));
    assert!(stream.advance_if(&Token::Comma).unwrap().is_none());
    assert!(stream.advance_if(&Token::Operator(Operator::Eq)).unwrap().is_some());

    let alias = stream.expect_kind(&[TokenKind::Alias]).unwrap();
    assert_eq!(alias.token, Token::Alias("@title".into()));
    assert_eq!(alias.span, Span::new(9, 15));
    assert!(stream.check(&[TokenKind::Eof]));
}

#[test]
fn test_stream_expect_reports_found_token() {
    let mut stream = tokenize("Title eq").unwrap();
    let err = stream.expect(&Token::LParen).unwrap_err();
    assert_eq!(err.message(), "Expected '(', but found name 'Title'");
    assert_eq!(err.span(), Span::new(0, 5));
}

#[test]
fn test_stream_fails_lexically_on_lookahead() {
    assert!(tokenize("Title #").is_err());
}
