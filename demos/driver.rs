//! Parses a document, edits it in place and prints each stage.
//!
//! Run with: cargo run --example driver

use jsonode::{parse, stringify, Value};
use std::error::Error;

const DOCUMENT: &str = r#"
    {
        "test1": "Hello, World! 这是一段测试文本",
        "测试2": 123,

        "test4": false,      "test5  "   :   [12.57,  "true", {}, {"not":0}, []]

    }
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = Value::new();
    parse(&mut doc, DOCUMENT)?;
    println!("{}", doc);

    let compact = stringify(&doc);
    println!("{}", compact);

    let mut reparsed = Value::new();
    parse(&mut reparsed, &compact)?;
    println!("{}", reparsed);

    doc["测试2"] = 58.1.into();
    println!("{}", doc["测试2"]);

    doc["这是一个新的测试"] = 79.into();
    doc["test5  "] += false;
    doc["test5  "][3]["not"] = "0000".into();
    println!("{}", doc["test5  "]);
    println!("{}", doc["test5  "][3]["not"]);

    let mut broken = Value::new();
    if let Err(code) = parse(&mut broken, "[1, 2,]") {
        println!("rejected: {} ({:?})", code, broken.value_type());
    }

    Ok(())
}
