use jsonode::{
    from_str, parse, stringify, stringify_pretty, to_string_with_options, to_value, FormatOptions,
    ParseError, Style, TextMode, Value, ValueType,
};
use serde::Serialize;

const SAMPLE: &str = r#"
    {
        "test1": "Hello, World!",
        "测试2": 123,

        "test4": false,      "test5  "   :   [12.57,  "true", {}, {"not":0}, []]
    }
"#;

#[derive(Serialize)]
struct Order {
    order_id: u32,
    items: Vec<Item>,
    note: Option<String>,
}

#[derive(Serialize)]
struct Item {
    sku: String,
    price: f64,
}

#[test]
fn test_parse_sample_document() {
    let mut doc = Value::new();
    parse(&mut doc, SAMPLE).unwrap();

    assert_eq!(doc.len(), Some(4));
    assert_eq!(doc["测试2"], Value::Number(123.0));
    assert_eq!(doc["test5  "][0], Value::Number(12.57));
    assert_eq!(doc["test5  "][3]["not"], Value::Number(0.0));
    assert!(doc["test5  "][4].is_empty());
}

#[test]
fn test_compact_output_keeps_document_order() {
    let doc = from_str(SAMPLE).unwrap();
    assert_eq!(
        stringify(&doc),
        r#"{"test1":"Hello, World!","测试2":123.000000,"test4":false,"test5  ":[12.570000,"true",{},{"not":0.000000},[]]}"#
    );
}

#[test]
fn test_diagnostic_output() {
    let doc = from_str(SAMPLE).unwrap();
    assert_eq!(
        stringify_pretty(&doc),
        r#"{ "test1": "Hello, World!", "测试2": 123.000000, "test4": false, "test5  ": [ 12.570000, "true", { }, { "not": 0.000000 }, [ ] ] }"#
    );
    assert_eq!(doc.to_string(), stringify_pretty(&doc));
}

#[test]
fn test_compact_output_reparses_to_equal_tree() {
    let original = from_str(SAMPLE).unwrap();
    let mut reparsed = Value::new();
    parse(&mut reparsed, &stringify(&original)).unwrap();
    assert_eq!(original, reparsed);
}

#[test]
fn test_editing_session() {
    let mut doc = from_str(SAMPLE).unwrap();

    doc["测试2"] = 58.1.into();
    assert_eq!(doc["测试2"].to_string(), "58.100000");

    doc["new key"] = 79.into();
    doc["test5  "] += false;
    doc["test5  "][3]["not"] = "0000".into();

    assert_eq!(
        doc["test5  "].to_string(),
        r#"[ 12.570000, "true", { }, { "not": "0000" }, [ ], false ]"#
    );
    assert_eq!(doc["test5  "][3]["not"].to_string(), r#""0000""#);

    doc -= "test1";
    doc["test5  "] -= 0;
    assert_eq!(doc.len(), Some(4));
    assert_eq!(doc["test5  "][0].value_type(), ValueType::String);
}

#[test]
fn test_clone_is_independent() {
    let original = from_str(r#"{"list": [1, 2]}"#).unwrap();
    let mut copy = original.clone();
    copy["list"] += 3;
    copy["extra"] = Value::Null;

    assert_eq!(original["list"].len(), Some(2));
    assert_eq!(copy["list"].len(), Some(3));
    assert!(original.get_key("extra").is_err());
}

#[test]
fn test_undefined_anywhere_blanks_output() {
    let mut doc = from_str("[1, {\"a\": 2}]").unwrap();
    doc[1]["a"] = Value::Undefined;
    assert_eq!(stringify(&doc), "");
    assert_eq!(stringify_pretty(&doc), "");
}

#[test]
fn test_failed_parse_is_all_or_nothing() {
    let mut doc = from_str(r#"{"keep": true}"#).unwrap();
    assert_eq!(
        parse(&mut doc, r#"{"a": [1, 2, {"b": nul}]}"#),
        Err(ParseError::InvalidValue)
    );
    assert!(doc.is_undefined());
    assert_eq!(stringify(&doc), "");
}

#[test]
fn test_precision_option() {
    let doc = from_str("[0.126, 2]").unwrap();
    let options = FormatOptions::new().with_precision(2);
    assert_eq!(to_string_with_options(&doc, &options), "[0.13,2.00]");

    let options = options.with_style(Style::Diagnostic).with_precision(0);
    assert_eq!(to_string_with_options(&doc, &options), "[ 0, 2 ]");
}

#[test]
fn test_scalar_text_mode() {
    let doc = Value::from_text("[not json", TextMode::Scalar).unwrap();
    assert_eq!(stringify(&doc), r#""[not json""#);
    assert!(Value::from_text("[not json", TextMode::Document).is_err());
}

#[test]
fn test_struct_to_tree() {
    let order = Order {
        order_id: 7,
        items: vec![Item {
            sku: "A-1".to_string(),
            price: 9.5,
        }],
        note: None,
    };

    let tree = to_value(&order).unwrap();
    assert_eq!(
        stringify(&tree),
        r#"{"order_id":7.000000,"items":[{"sku":"A-1","price":9.500000}],"note":null}"#
    );
}

#[test]
fn test_compact_output_is_valid_json() {
    let doc = from_str(r#"{"s": "tab\there \"q\" \\ \u0001", "n": [-1.5e3, 0]}"#).unwrap();
    let text = stringify(&doc);

    let reference: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reference["s"], "tab\there \"q\" \\ \u{1}");
    assert_eq!(reference["n"][0].as_f64(), Some(-1500.0));
}
