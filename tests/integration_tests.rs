use chrono::{TimeZone, Utc};
use odata_filter::cli::{
    self, CheckOptions, CheckResult, CliError, CompareOptions, EncodeOptions, ReadOptions,
    RewriteOptions,
};
use odata_filter::{
    Binding, EncodeError, ManagerError, Filter, Function, LambdaOp, Operator, bindings_from_json,
    bindings_to_json, compare, encode, encode_json, from_json, parse, to_json,
};
use serde_json::json;

fn round_trip(text: &str) -> Filter {
    let filter = parse(text).unwrap();
    let encoded = encode(&filter, None).unwrap();
    let reparsed = parse(&encoded)
        .unwrap_or_else(|e| panic!("{} encoded as {} which does not parse: {}", text, encoded, e));
    assert!(
        compare(&filter, &reparsed, None),
        "{} encoded as {} which parses differently",
        text,
        encoded
    );
    reparsed
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_round_trip() {
    let filters = [
        "Title eq 'A book'",
        "Quantity gt 100",
        "base add tax add income gt minimum",
        "condition eq true or number lt 300 or lookup in (2, 3, 5, 7)",
        "contains(Name, 'corp') and Price gt 250000000 and Location eq 'Barcelona'",
        "((condition eq true) or (number lt 300) or (lookup in (2)))",
        "a and (b and c)",
        "a sub b sub c",
        "a add b mul c",
        "a eq b eq c",
        "Orders/any(o: o/Articles/all(p: p/Category eq 'Cookies'))",
        "AGENT_FORMATPER/any(o: o/TARGETLIST in [31, 22])",
        "$it/Address/City eq ShipTo/City",
        "Country/City/$count gt 3",
        "Value eq null",
        "Value eq INF",
        "Value eq -INF",
        "Name eq 'O''Neil'",
        "not IsActive",
        "-(5) eq Price",
        "- -5 eq Price",
        "Price gt -2.5",
        "LastRenovationDate gt 2022-03-09T23:00:00.000Z",
        "LastRenovationDate gt 2022-03-09T23:00:00.1234Z",
        "date(2022-11-20T23:00:00.000Z) eq Created",
        "Id eq 01234567-8901-2345-6789-012345678901",
        "Created lt now()",
        "tolower(trim(Name)) eq 'abc'",
        "substring(Name, 1, 2) eq 'bc'",
        "Style has 'Yellow'",
        "any(x: x gt 1)",
        "Title eq @title and Published gt @published",
    ];

    for text in filters {
        round_trip(text);
    }
}

#[test]
fn test_round_trip_is_stable() {
    let once = encode(&parse("a eq 1 or b eq 2 and not c").unwrap(), None).unwrap();
    let twice = encode(&parse(&once).unwrap(), None).unwrap();
    assert_eq!(once, "((a eq 1) or ((b eq 2) and -c))");
    assert_eq!(once, twice);
}

#[test]
fn test_sub_millisecond_date_round_trip_text() {
    let filter = parse("Shipped eq 2022-03-09T23:00:00.1234Z").unwrap();
    let encoded = encode(&filter, None).unwrap();
    assert_eq!(encoded, "(Shipped eq 2022-03-09T23:00:00.123Z)");
    assert_eq!(parse(&encoded).unwrap(), filter);
}

#[test]
fn test_negative_infinity_encodes_as_negated_infinity() {
    // Parsing never yields a negative infinite number; `-INF` reads back as a
    // negation of INF.
    let value = Filter::operation(
        Operator::Eq,
        vec![Filter::property("Value"), f64::NEG_INFINITY.into()],
    );
    let encoded = encode(&value, None).unwrap();
    assert_eq!(encoded, "(Value eq -INF)");
    assert_eq!(
        parse(&encoded).unwrap(),
        Filter::operation(
            Operator::Eq,
            vec![Filter::property("Value"), Filter::not(f64::INFINITY.into())]
        )
    );

    let negated = Filter::not(f64::NEG_INFINITY.into());
    assert_eq!(encode(&negated, None).unwrap(), "--INF");
    assert_eq!(
        parse("--INF").unwrap(),
        Filter::not(Filter::not(f64::INFINITY.into()))
    );
}

#[test]
fn test_lambda_round_trip_text() {
    let filter = parse("Orders/any(o: o/Articles/all(p: p/Category eq 'Cookies'))").unwrap();
    assert_eq!(
        encode(&filter, None).unwrap(),
        "Orders/any(o:o/Articles/all(p:(p/Category eq 'Cookies')))"
    );
}

// ============================================================================
// Capture Then Rewrite
// ============================================================================

#[test]
fn test_capture_then_rewrite() {
    let condition = parse("Title eq @title and Published gt @published").unwrap();
    let data = parse("Title eq 'Dune' and Published gt 1965").unwrap();

    let mut captures = vec![];
    assert!(compare(&condition, &data, Some(&mut captures)));

    let rewritten = encode(&condition, Some(&captures)).unwrap();
    assert_eq!(rewritten, "((Title eq 'Dune') and (Published gt 1965))");
    assert!(compare(&parse(&rewritten).unwrap(), &data, None));
}

// ============================================================================
// JSON Form
// ============================================================================

#[test]
fn test_to_json_shapes() {
    let filter = parse("Title eq @title and contains(Name, 'corp')").unwrap();
    assert_eq!(
        to_json(&filter),
        json!({
            "and": [
                {"eq": [{"property": "Title"}, {"alias": "@title"}]},
                {"contains": [{"property": "Name"}, "corp"]}
            ]
        })
    );
}

#[test]
fn test_to_json_special_values() {
    let date = Utc.with_ymd_and_hms(2022, 3, 9, 23, 0, 0).unwrap();
    assert_eq!(
        to_json(&Filter::from(date)),
        json!({"datetime": "2022-03-09T23:00:00.000Z"})
    );
    assert_eq!(to_json(&Filter::from(f64::NAN)), json!({"constant": "NaN"}));
    assert_eq!(to_json(&Filter::from(f64::INFINITY)), json!({"constant": "INF"}));
    assert_eq!(to_json(&Filter::from(f64::NEG_INFINITY)), json!({"constant": "-INF"}));
    assert_eq!(to_json(&Filter::from(100)), json!(100));
    assert_eq!(to_json(&Filter::from(2.5)), json!(2.5));
    assert_eq!(to_json(&Filter::Null), json!(null));
}

#[test]
fn test_to_json_lambda_and_single_argument() {
    let filter = parse("Orders/any(o: year(o/Placed) eq 2020)").unwrap();
    assert_eq!(
        to_json(&filter),
        json!({
            "lambda": "any",
            "path": "Orders",
            "name": "o",
            "expression": {"eq": [{"year": {"property": "o/Placed"}}, 2020]}
        })
    );
}

#[test]
fn test_from_json_accepts_both_argument_forms() {
    let bare = from_json(&json!({"date": {"datetime": "2022-11-20T23:00:00.000Z"}})).unwrap();
    let listed = from_json(&json!({"date": [{"datetime": "2022-11-20T23:00:00.000Z"}]})).unwrap();
    let expected = Filter::function(
        Function::Date,
        vec![Utc.with_ymd_and_hms(2022, 11, 20, 23, 0, 0).unwrap().into()],
    );
    assert_eq!(bare, expected);
    assert_eq!(listed, expected);
}

#[test]
fn test_json_round_trip() {
    let filters = [
        "Orders/any(o: o/Articles/all(p: p/Category eq 'Cookies'))",
        "lookup in (2, 3) and not IsActive",
        "hassubset(Ids, [1, 2])",
        "Value eq INF or Created gt 2022-03-09T23:00:00.000Z",
        "any(x: x gt 1)",
        "Country/City/$count gt 3",
    ];
    for text in filters {
        let filter = parse(text).unwrap();
        assert_eq!(from_json(&to_json(&filter)).unwrap(), filter, "Failed for {}", text);
    }
}

#[test]
fn test_encode_json() {
    let value = json!({"eq": [{"property": "Value"}, {"alias": "@limit"}]});
    assert_eq!(encode_json(&value, None).unwrap(), "(Value eq @limit)");
    assert_eq!(
        encode_json(&value, Some(&[Binding::new("limit", 5)])).unwrap(),
        "(Value eq 5)"
    );

    let lambda = json!({
        "lambda": "any",
        "path": "AGENT_FORMATPER",
        "name": "o",
        "expression": {"in": [{"property": "o/TARGETLIST"}, [31, 22]]}
    });
    assert_eq!(
        encode_json(&lambda, None).unwrap(),
        "AGENT_FORMATPER/any(o:(o/TARGETLIST in (31,22)))"
    );
}

#[test]
fn test_unrecognized_json_fails() {
    for value in [
        json!({"unknown": 1}),
        json!({"property": "a", "alias": "@b"}),
        json!({}),
        json!({"eq": 1}),
        json!({"constant": "NOPE"}),
        json!({"datetime": "yesterday"}),
        json!({"lambda": "some", "name": "x", "expression": true}),
    ] {
        assert!(
            matches!(encode_json(&value, None), Err(EncodeError::UnrecognizedFilter(_))),
            "Expected failure for {}",
            value
        );
    }
}

#[test]
fn test_bindings_json() {
    let bindings = vec![Binding::new("title", "A book"), Binding::new("year", 1965)];
    let value = bindings_to_json(&bindings);
    assert_eq!(value, json!([["title", "A book"], ["year", 1965]]));
    assert_eq!(bindings_from_json(&value).unwrap(), bindings);

    let from_object = bindings_from_json(&json!({"limit": {"property": "Other"}})).unwrap();
    assert_eq!(from_object, vec![Binding::new("limit", Filter::property("Other"))]);

    assert!(bindings_from_json(&json!([["limit"]])).is_err());
    assert!(bindings_from_json(&json!("limit")).is_err());
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_parse() {
    let options = CheckOptions {
        filter: "Quantity gt 100".to_string(),
        syntax_only: false,
    };
    match cli::execute_check(&options).unwrap() {
        CheckResult::Success(value) => {
            assert_eq!(value, json!({"gt": [{"property": "Quantity"}, 100]}))
        }
        CheckResult::SyntaxValid => panic!("expected a tree"),
    }
}

#[test]
fn test_cli_parse_syntax_only() {
    let options = CheckOptions {
        filter: "Quantity gt 100".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(cli::execute_check(&options).unwrap(), CheckResult::SyntaxValid));

    let invalid = CheckOptions {
        filter: "Quantity gt".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(cli::execute_check(&invalid), Err(CliError::Parse(_))));
}

#[test]
fn test_cli_encode() {
    let options = EncodeOptions {
        input: Some(r#"{"eq": [{"property": "Value"}, {"alias": "@limit"}]}"#.to_string()),
        bindings: Some(r#"{"limit": 5}"#.to_string()),
    };
    assert_eq!(cli::execute_encode(&options).unwrap(), "(Value eq 5)");
}

#[test]
fn test_cli_encode_errors() {
    assert!(matches!(
        cli::execute_encode(&EncodeOptions::default()),
        Err(CliError::NoInput)
    ));

    let bad_json = EncodeOptions {
        input: Some("{".to_string()),
        bindings: None,
    };
    assert!(matches!(cli::execute_encode(&bad_json), Err(CliError::Json(_))));

    let unknown = EncodeOptions {
        input: Some(r#"{"nope": 1}"#.to_string()),
        bindings: None,
    };
    assert!(matches!(cli::execute_encode(&unknown), Err(CliError::Encode(_))));
}

#[test]
fn test_cli_compare() {
    let options = CompareOptions {
        condition: "Title eq @title".to_string(),
        data: "Title eq 'A book'".to_string(),
    };
    let result = cli::execute_compare(&options).unwrap();
    assert!(result.matches);
    assert_eq!(
        result.to_json(),
        json!({"matches": true, "bindings": [["title", "A book"]]})
    );

    let mismatch = CompareOptions {
        condition: "Title eq @title and Published eq 1".to_string(),
        data: "Title eq 'A book' and Published eq 2".to_string(),
    };
    let result = cli::execute_compare(&mismatch).unwrap();
    assert_eq!(result.to_json(), json!({"matches": false, "bindings": []}));
}

#[test]
fn test_cli_rewrite() {
    let options = RewriteOptions {
        filter: "Value eq @limit and Name eq @name".to_string(),
        bindings: r#"[["limit", 5]]"#.to_string(),
    };
    assert_eq!(
        cli::execute_rewrite(&options).unwrap(),
        "((Value eq 5) and (Name eq @name))"
    );
}

#[test]
fn test_cli_read() {
    let options = ReadOptions {
        filter: "(Rating gt 4 or Color eq 'red') and Size eq 3".to_string(),
        conditions: vec!["Color eq @color".to_string(), "Size eq @size".to_string()],
        ..Default::default()
    };
    assert_eq!(cli::execute_read(&options).unwrap(), vec![Binding::new("size", 3)]);

    let deep = ReadOptions {
        deep: true,
        ..options.clone()
    };
    assert_eq!(
        cli::execute_read(&deep).unwrap(),
        vec![Binding::new("color", "red"), Binding::new("size", 3)]
    );
}

#[test]
fn test_cli_read_invalid_aggregation() {
    let options = ReadOptions {
        filter: "Size eq 3".to_string(),
        conditions: vec!["Size eq @size".to_string()],
        aggregation: "xor".to_string(),
        ..Default::default()
    };
    match cli::execute_read(&options) {
        Err(CliError::Manager(e)) => {
            assert_eq!(e, ManagerError::InvalidAggregation("xor".to_string()))
        }
        other => panic!("expected a manager error, got {:?}", other),
    }
}

#[test]
fn test_cli_docs() {
    assert!(cli::get_docs_overview().contains("operators"));
    assert!(cli::get_doc_category("operators").unwrap().contains("PRECEDENCE"));
    assert!(cli::get_doc_category("Functions").unwrap().contains("matchesPattern"));
    assert!(matches!(
        cli::get_doc_category("queries"),
        Err(CliError::UnknownCategory(_))
    ));
}

#[test]
fn test_lambda_builder_matches_parser() {
    assert_eq!(
        parse("Rooms/all(room: room/SmokingAllowed eq true)").unwrap(),
        Filter::lambda(
            LambdaOp::All,
            Some("Rooms"),
            "room",
            Filter::operation(
                Operator::Eq,
                vec![Filter::property("room/SmokingAllowed"), true.into()]
            )
        )
    );
}
