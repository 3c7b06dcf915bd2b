//! Moving between typed structs and dynamic trees.
//!
//! Run with: cargo run --example dynamic_values

use jsonode::{from_value, jsonode, stringify, to_value, Value};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = jsonode!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "debug": true
    });

    config["features"] += "metrics";
    println!("Config: {}\n", config);

    if let Some(host) = config["host"].as_str() {
        println!("host = {}", host);
    }
    let port: f64 = config["port"].get()?;
    println!("port = {}", port);
    println!("features: {} items\n", config["features"].len().unwrap_or(0));

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let mut user_value = to_value(&user)?;
    println!("User as text: {}", stringify(&user_value));

    user_value["roles"] -= 0;
    user_value["name"] = Value::from("Alice B.");
    let edited: User = from_value(user_value)?;
    println!("Edited user: {:?}", edited);

    Ok(())
}
