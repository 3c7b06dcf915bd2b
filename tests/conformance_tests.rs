//! Grammar conformance: every accepted form and every error code.

use jsonode::{from_str, parse, ParseError, Value};

fn parse_code(json: &str) -> Result<Value, ParseError> {
    let mut node = Value::new();
    parse(&mut node, json).map(|_| node)
}

fn assert_error(json: &str, code: ParseError) {
    assert_eq!(parse_code(json), Err(code), "input: {:?}", json);
}

fn assert_number(json: &str, expected: f64) {
    assert_eq!(parse_code(json), Ok(Value::Number(expected)), "input: {:?}", json);
}

fn assert_string(json: &str, expected: &str) {
    assert_eq!(
        parse_code(json),
        Ok(Value::String(expected.to_string())),
        "input: {:?}",
        json
    );
}

#[test]
fn test_literals() {
    assert_eq!(parse_code("null"), Ok(Value::Null));
    assert_eq!(parse_code(" true "), Ok(Value::Bool(true)));
    assert_eq!(parse_code("\t\r\nfalse"), Ok(Value::Bool(false)));
}

#[test]
fn test_numbers() {
    assert_number("0", 0.0);
    assert_number("-0", 0.0);
    assert_number("-0.0", 0.0);
    assert_number("1", 1.0);
    assert_number("-1", -1.0);
    assert_number("1.5", 1.5);
    assert_number("-1.5", -1.5);
    assert_number("3.1416", 3.1416);
    assert_number("1E10", 1e10);
    assert_number("1e10", 1e10);
    assert_number("1E+10", 1e10);
    assert_number("1E-10", 1e-10);
    assert_number("-1E10", -1e10);
    assert_number("1.234E+10", 1.234e10);
    assert_number("1e-10000", 0.0);
    assert_number("1.0000000000000002", 1.000_000_000_000_000_2);
    assert_number("4.9406564584124654e-324", 4.940_656_458_412_465_4e-324);
    assert_number("1.7976931348623157e+308", f64::MAX);
    assert_number("-1.7976931348623157e+308", f64::MIN);
}

#[test]
fn test_strings() {
    assert_string(r#""""#, "");
    assert_string(r#""Hello""#, "Hello");
    assert_string(r#""Hello\nWorld""#, "Hello\nWorld");
    assert_string(r#""\" \\ \/ \b \f \n \r \t""#, "\" \\ / \u{8} \u{c} \n \r \t");
    assert_string(r#""Hello\u0000World""#, "Hello\0World");
    assert_string(r#""\u0024""#, "$");
    assert_string(r#""\u00A2""#, "\u{a2}");
    assert_string(r#""\u20AC""#, "\u{20ac}");
    assert_string(r#""\uD834\uDD1E""#, "\u{1d11e}");
    assert_string(r#""\ud834\udd1e""#, "\u{1d11e}");
    assert_string("\"直接\"", "直接");
}

#[test]
fn test_containers() {
    let array = parse_code("[ null , false , true , 123 , \"abc\" ]").unwrap();
    assert_eq!(array.len(), Some(5));
    assert_eq!(array[4].as_str(), Some("abc"));

    let nested = parse_code("[ [ ] , [ 0 ] , [ 0 , 1 ] , [ 0 , 1 , 2 ] ]").unwrap();
    for (i, inner) in nested.as_array().unwrap().iter().enumerate() {
        assert_eq!(inner.len(), Some(i));
    }

    let object = parse_code(
        r#" { "n" : null , "f" : false , "t" : true , "i" : 123 , "s" : "abc",
              "a" : [ 1, 2, 3 ], "o" : { "1" : 1, "2" : 2, "3" : 3 } } "#,
    )
    .unwrap();
    assert_eq!(object.len(), Some(7));
    assert_eq!(object["o"]["3"], Value::Number(3.0));
}

#[test]
fn test_expect_value() {
    assert_error("", ParseError::ExpectValue);
    assert_error(" ", ParseError::ExpectValue);
    assert_error("[", ParseError::ExpectValue);
    assert_error("{\"a\":", ParseError::ExpectValue);
}

#[test]
fn test_invalid_value() {
    for json in [
        "nul", "?", "+0", "+1", ".123", "1.", "INF", "inf", "NAN", "nan", "[1,]", "[\"a\", nul]",
        "tru", "True",
    ] {
        assert_error(json, ParseError::InvalidValue);
    }
}

#[test]
fn test_root_not_singular() {
    assert_error("null x", ParseError::RootNotSingular);
    assert_error("0123", ParseError::RootNotSingular);
    assert_error("0x0", ParseError::RootNotSingular);
    assert_error("0x123", ParseError::RootNotSingular);
    assert_error("[] []", ParseError::RootNotSingular);
}

#[test]
fn test_number_too_big() {
    assert_error("1e309", ParseError::NumberTooBig);
    assert_error("-1e309", ParseError::NumberTooBig);
    assert_error("[1e400]", ParseError::NumberTooBig);
}

#[test]
fn test_string_errors() {
    assert_error("\"", ParseError::MissQuotationMark);
    assert_error("\"abc", ParseError::MissQuotationMark);
    assert_error("\"abc\\", ParseError::MissQuotationMark);

    for json in ["\"\\v\"", "\"\\'\"", "\"\\0\"", "\"\\x12\""] {
        assert_error(json, ParseError::InvalidStringEscape);
    }

    assert_error("\"\u{01}\"", ParseError::InvalidStringChar);
    assert_error("\"\u{1F}\"", ParseError::InvalidStringChar);
    assert_error("\"a\nb\"", ParseError::InvalidStringChar);
}

#[test]
fn test_unicode_errors() {
    for json in [
        r#""\u""#, r#""\u0""#, r#""\u01""#, r#""\u012""#, r#""\u/000""#, r#""\uG000""#,
        r#""\u0/00""#, r#""\u0G00""#, r#""\u000/""#, r#""\u000G""#, r#""\u 123""#,
    ] {
        assert_error(json, ParseError::InvalidUnicodeHex);
    }

    for json in [
        r#""\uD800""#, r#""\uDBFF""#, r#""\uD800\\""#, r#""\uD800\uDBFF""#, r#""\uD800\uE000""#,
        r#""\uDC00""#,
    ] {
        assert_error(json, ParseError::InvalidUnicodeSurrogate);
    }
}

#[test]
fn test_array_errors() {
    assert_error("[1", ParseError::MissCommaOrSquareBracket);
    assert_error("[1}", ParseError::MissCommaOrSquareBracket);
    assert_error("[1 2", ParseError::MissCommaOrSquareBracket);
    assert_error("[[]", ParseError::MissCommaOrSquareBracket);
    assert_error("[01]", ParseError::MissCommaOrSquareBracket);
}

#[test]
fn test_object_errors() {
    for json in ["{:1,", "{1:1,", "{true:1,", "{false:1,", "{null:1,", "{[]:1,", "{{}:1,", "{\"a\":1,"] {
        assert_error(json, ParseError::MissKey);
    }

    assert_error("{\"a\"}", ParseError::MissColon);
    assert_error("{\"a\",\"b\"}", ParseError::MissColon);

    for json in ["{\"a\":1", "{\"a\":1]", "{\"a\":1 \"b\"", "{\"a\":{}"] {
        assert_error(json, ParseError::MissCommaOrCurlyBracket);
    }
}

#[test]
fn test_key_string_errors_propagate() {
    assert_error("{\"a", ParseError::MissQuotationMark);
    assert_error("{\"\\q\": 1}", ParseError::InvalidStringEscape);
}

#[test]
fn test_duplicate_keys_last_wins() {
    let doc = parse_code(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(doc.len(), Some(2));
    assert_eq!(doc["a"], Value::Number(3.0));
    let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_error_positions() {
    let err = from_str("{\n  \"a\": [1,\n        2,,]\n}").unwrap_err();
    assert_eq!(err.parse_code(), Some(ParseError::InvalidValue));
    assert!(err.to_string().contains("line 3, column 11"), "{}", err);
}

#[test]
fn test_deep_nesting_is_rejected_not_fatal() {
    let depth = 100_000;
    let json = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_error(&json, ParseError::DepthLimitExceeded);

    let json = format!("{}1{}", "{\"a\":[".repeat(depth), "]}".repeat(depth));
    let err = from_str(&json).unwrap_err();
    assert_eq!(err.parse_code(), Some(ParseError::DepthLimitExceeded));
}
