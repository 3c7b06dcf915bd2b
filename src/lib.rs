//! # jsonode
//!
//! A small JSON library built around one owned document tree, [`Value`].
//!
//! ## What it does
//!
//! - **Parses** text into a tree with a strict recursive-descent parser
//!   (no comments, no trailing commas, surrogate pairs decoded to UTF-8)
//! - **Serializes** a tree back to text, either compact or in a spaced
//!   diagnostic form meant for logs and traces
//! - **Edits** trees through subscript, append and remove operators, each
//!   backed by a fallible method
//! - **Bridges to serde**: any `T: Serialize` becomes a tree with
//!   [`to_value`], and a tree becomes any `T: Deserialize` with [`from_value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonode::{parse, stringify, Value};
//!
//! let mut doc = Value::new();
//! parse(&mut doc, r#"{"name": "Alice", "tags": ["admin"]}"#).unwrap();
//!
//! doc["age"] = 30.into();
//! doc["tags"] += "ops";
//!
//! assert_eq!(
//!     stringify(&doc),
//!     r#"{"name":"Alice","tags":["admin","ops"],"age":30.000000}"#
//! );
//!
//! // Display gives the diagnostic form
//! println!("{}", doc);
//! ```
//!
//! ## Failed parses
//!
//! [`parse`] is all-or-nothing. On failure the target becomes
//! [`Value::Undefined`] and a [`ParseError`] code is returned; no partial
//! tree survives. An undefined node refuses further parses until it is
//! reassigned, and serializes to the empty string.
//!
//! ```rust
//! use jsonode::{parse, stringify, ParseError, Value};
//!
//! let mut doc = Value::new();
//! assert_eq!(parse(&mut doc, "[1, 2,]"), Err(ParseError::InvalidValue));
//! assert!(doc.is_undefined());
//! assert_eq!(stringify(&doc), "");
//!
//! assert_eq!(parse(&mut doc, "[1]"), Err(ParseError::InvalidValue));
//! doc = Value::new();
//! assert!(parse(&mut doc, "[1]").is_ok());
//! ```
//!
//! ## Object member order
//!
//! Objects keep their members in insertion order (document order when
//! parsed), so output is deterministic. A repeated key keeps its first
//! position and its last value.
//!
//! ## Numbers
//!
//! Every number is an `f64`. Serialization uses fixed notation with six
//! fractional digits unless [`FormatOptions::precision`] says otherwise,
//! so `1` is written back as `1.000000`.

pub mod de;
pub mod error;
mod lexer;
pub mod macros;
pub mod map;
mod ops;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{Parser, ValueDeserializer};
pub use error::{Error, ParseError, Result};
pub use map::Map;
pub use options::{FormatOptions, ParseOptions, Style, DEFAULT_MAX_DEPTH, DEFAULT_PRECISION};
pub use ser::{Formatter, ValueSerializer};
pub use value::{TextMode, Value, ValueType};

use serde::{Deserialize, Serialize};
use std::io;

/// Parses `json` as a root document into `target`.
///
/// On success `target` holds the new tree. On failure `target` is left
/// [`Value::Undefined`]. Parsing into a target that is already undefined is
/// rejected with [`ParseError::InvalidValue`] without looking at `json`.
///
/// # Examples
///
/// ```rust
/// use jsonode::{parse, ParseError, Value};
///
/// let mut node = Value::new();
/// assert_eq!(parse(&mut node, " [ ] "), Ok(()));
/// assert_eq!(node, Value::Array(vec![]));
///
/// assert_eq!(parse(&mut node, "123 abc"), Err(ParseError::RootNotSingular));
/// ```
///
/// # Errors
///
/// Returns the code of the first grammar violation.
pub fn parse(target: &mut Value, json: &str) -> std::result::Result<(), ParseError> {
    parse_with_options(target, json, &ParseOptions::default())
}

/// [`parse`] with custom [`ParseOptions`].
///
/// # Errors
///
/// Returns the code of the first grammar violation.
pub fn parse_with_options(
    target: &mut Value,
    json: &str,
    options: &ParseOptions,
) -> std::result::Result<(), ParseError> {
    if target.is_undefined() {
        return Err(ParseError::InvalidValue);
    }
    *target = Value::Undefined;

    let mut parser = Parser::new(json, options);
    match parser.parse_document() {
        Ok(value) => {
            *target = value;
            Ok(())
        }
        Err(code) => {
            log::debug!("parse failed: {}", parser.located(code));
            Err(code)
        }
    }
}

/// Serializes `node` in compact form.
///
/// Returns an empty string if the tree contains an undefined node.
///
/// # Examples
///
/// ```rust
/// use jsonode::{stringify, Value};
///
/// let node: Value = r#"{"a": [true, null, "x\ny"]}"#.parse().unwrap();
/// assert_eq!(stringify(&node), r#"{"a":[true,null,"x\ny"]}"#);
/// ```
#[must_use]
pub fn stringify(node: &Value) -> String {
    to_string_with_options(node, &FormatOptions::compact())
}

/// Serializes `node` in diagnostic form (`{ "a": [ 1.000000 ] }`).
///
/// Not meant to be parsed again: strings are not escaped.
#[must_use]
pub fn stringify_pretty(node: &Value) -> String {
    to_string_with_options(node, &FormatOptions::diagnostic())
}

/// Serializes `node` with custom [`FormatOptions`].
#[must_use]
pub fn to_string_with_options(node: &Value, options: &FormatOptions) -> String {
    Formatter::new(options).format(node)
}

/// Writes the compact form of `node` to `writer`.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W>(mut writer: W, node: &Value) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(stringify(node).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parses a root document into a new [`Value`].
///
/// Unlike [`parse`], the error carries the line and column where parsing stopped.
///
/// # Examples
///
/// ```rust
/// use jsonode::{from_str, ParseError};
///
/// let err = from_str("[1,\n 2 3]").unwrap_err();
/// assert_eq!(err.parse_code(), Some(ParseError::MissCommaOrSquareBracket));
/// assert!(err.to_string().contains("line 2, column 4"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is not a single JSON document.
pub fn from_str(s: &str) -> Result<Value> {
    from_str_with_options(s, &ParseOptions::default())
}

/// [`from_str`] with custom [`ParseOptions`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input is not a single JSON document.
pub fn from_str_with_options(s: &str, options: &ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(s, options);
    parser.parse_document().map_err(|code| {
        let err = parser.located(code);
        log::debug!("parse failed: {}", err);
        err
    })
}

/// Parses a root document from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not a JSON document.
pub fn from_slice(v: &[u8]) -> Result<Value> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Reads the whole of `reader` and parses it as a root document.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not a JSON document.
pub fn from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use jsonode::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value["y"], Value::Number(2.0));
/// ```
///
/// # Errors
///
/// Returns an error if `T` serializes a map with non-string keys.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Converts a [`Value`] tree into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use jsonode::{from_str, from_value};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let tree = from_str(r#"{"x": 1, "y": -2}"#).unwrap();
/// let point: Point = from_value(tree).unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not have the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}
