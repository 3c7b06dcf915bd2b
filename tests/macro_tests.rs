use jsonode::{jsonode, stringify, Map, Value};
use serde::Serialize;

#[derive(Serialize)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn test_macro_matches_parsed_document() {
    let built = jsonode!({
        "name": "Alice",
        "scores": [95, 87.5],
        "active": true,
        "manager": null,
        "meta": {}
    });
    let parsed: Value =
        r#"{"name":"Alice","scores":[95,87.5],"active":true,"manager":null,"meta":{}}"#
            .parse()
            .unwrap();

    assert_eq!(built, parsed);
}

#[test]
fn test_macro_with_variables() {
    let name = String::from("Bob");
    let count = 3u8;
    let doc = jsonode!({ "name": name, "count": count });

    assert_eq!(doc["name"].as_str(), Some("Bob"));
    assert_eq!(doc["count"].as_f64(), Some(3.0));
}

#[test]
fn test_macro_serializable_fallback() {
    let origin = Point { x: 0, y: -1 };
    let doc = jsonode!([origin, "label"]);
    assert_eq!(stringify(&doc), r#"[{"x":0.000000,"y":-1.000000},"label"]"#);
}

#[test]
fn test_macro_trailing_commas_and_empties() {
    assert_eq!(jsonode!([1, 2,]).len(), Some(2));
    assert_eq!(jsonode!({ "a": [], }), {
        let mut map = Map::new();
        map.insert("a".to_string(), Value::Array(vec![]));
        Value::Object(map)
    });
}
