//! JSON serialization.
//!
//! This module provides the [`Formatter`] that renders a [`Value`] tree as
//! text, and [`ValueSerializer`], which builds a tree from any
//! `T: Serialize`.
//!
//! ## Output styles
//!
//! - **Compact**: `{"k":[1.000000,true]}`, re-parseable
//! - **Diagnostic**: `{ "k": [ 1.000000, true ] }`, for trace output only;
//!   strings are quoted but not escaped
//!
//! Both styles render numbers in fixed notation (six fractional digits by
//! default) and render a tree containing an `Undefined` node as the empty
//! string.
//!
//! ## Usage
//!
//! ```rust
//! use jsonode::{stringify, stringify_pretty, Value};
//!
//! let value: Value = r#"{"k": [1, true], "e": {}}"#.parse().unwrap();
//! assert_eq!(stringify(&value), r#"{"k":[1.000000,true],"e":{}}"#);
//! assert_eq!(stringify_pretty(&value), r#"{ "k": [ 1.000000, true ], "e": { } }"#);
//! ```

use crate::{Error, FormatOptions, Map, Result, Style, Value};
use serde::{ser, Serialize};
use std::fmt::Write;

/// Marker for a render that hit an `Undefined` node.
struct UndefinedNode;

type Render = std::result::Result<(), UndefinedNode>;

/// Renders a [`Value`] tree to text.
///
/// Created via [`Formatter::new`]; consumed by [`Formatter::format`].
pub struct Formatter<'o> {
    output: String,
    options: &'o FormatOptions,
}

impl<'o> Formatter<'o> {
    pub fn new(options: &'o FormatOptions) -> Self {
        Formatter {
            output: String::with_capacity(128),
            options,
        }
    }

    /// Renders `value`. Returns an empty string if any node in the tree is undefined.
    #[must_use]
    pub fn format(mut self, value: &Value) -> String {
        match self.write_value(value) {
            Ok(()) => self.output,
            Err(UndefinedNode) => {
                log::debug!("refusing to serialize a tree containing an undefined node");
                String::new()
            }
        }
    }

    fn write_value(&mut self, value: &Value) -> Render {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(true) => self.output.push_str("true"),
            Value::Bool(false) => self.output.push_str("false"),
            Value::Number(n) => self.write_number(*n),
            Value::String(s) => self.write_string(s),
            Value::Array(arr) => self.write_array(arr)?,
            Value::Object(obj) => self.write_object(obj)?,
            Value::Undefined => return Err(UndefinedNode),
        }
        Ok(())
    }

    fn write_number(&mut self, n: f64) {
        if n.is_finite() {
            // Writing into a String cannot fail
            let _ = write!(self.output, "{:.*}", self.options.precision, n);
        } else {
            self.output.push_str("null");
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        match self.options.style {
            Style::Compact => {
                for ch in s.chars() {
                    match ch {
                        '"' => self.output.push_str("\\\""),
                        '\\' => self.output.push_str("\\\\"),
                        '\n' => self.output.push_str("\\n"),
                        '\r' => self.output.push_str("\\r"),
                        '\t' => self.output.push_str("\\t"),
                        '\u{0008}' => self.output.push_str("\\b"),
                        '\u{000C}' => self.output.push_str("\\f"),
                        c if (c as u32) < 0x20 => {
                            let _ = write!(self.output, "\\u{:04x}", c as u32);
                        }
                        c => self.output.push(c),
                    }
                }
            }
            Style::Diagnostic => self.output.push_str(s),
        }
        self.output.push('"');
    }

    fn write_array(&mut self, arr: &[Value]) -> Render {
        self.output.push('[');
        for (i, element) in arr.iter().enumerate() {
            match self.options.style {
                Style::Compact if i > 0 => self.output.push(','),
                Style::Compact => {}
                Style::Diagnostic if i > 0 => self.output.push_str(", "),
                Style::Diagnostic => self.output.push(' '),
            }
            self.write_value(element)?;
        }
        if self.options.style == Style::Diagnostic {
            self.output.push(' ');
        }
        self.output.push(']');
        Ok(())
    }

    fn write_object(&mut self, obj: &Map) -> Render {
        self.output.push('{');
        for (i, (key, value)) in obj.iter().enumerate() {
            match self.options.style {
                Style::Compact => {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_string(key);
                    self.output.push(':');
                }
                Style::Diagnostic => {
                    self.output.push_str(if i > 0 { ", " } else { " " });
                    self.write_string(key);
                    self.output.push_str(": ");
                }
            }
            self.write_value(value)?;
        }
        if self.options.style == Style::Diagnostic {
            self.output.push(' ');
        }
        self.output.push('}');
        Ok(())
    }
}

pub(crate) fn to_diagnostic_string(value: &Value) -> String {
    Formatter::new(&FormatOptions::diagnostic()).format(value)
}

/// Builds a [`Value`] tree from any `T: Serialize`.
///
/// Enum variants carrying data become single-member objects keyed by the
/// variant name; unit variants become strings.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn tagged(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut outer = Map::with_capacity(1);
            outer.insert(name.to_string(), value);
            Value::Object(outer)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(Some(variant), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Array(self.vec)))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Object(self.map)))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        ser::SerializeMap::end(self)
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeMap::end(self)
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(value: &Value) -> String {
        Formatter::new(&FormatOptions::compact()).format(value)
    }

    fn diagnostic(value: &Value) -> String {
        Formatter::new(&FormatOptions::diagnostic()).format(value)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(compact(&Value::Null), "null");
        assert_eq!(compact(&Value::Bool(true)), "true");
        assert_eq!(compact(&Value::Bool(false)), "false");
        assert_eq!(compact(&Value::Number(123.0)), "123.000000");
        assert_eq!(compact(&Value::Number(-0.5)), "-0.500000");
        assert_eq!(compact(&Value::Number(12.57)), "12.570000");
    }

    #[test]
    fn test_non_finite_numbers_render_null() {
        assert_eq!(compact(&Value::Number(f64::NAN)), "null");
        assert_eq!(compact(&Value::Number(f64::INFINITY)), "null");
    }

    #[test]
    fn test_compact_escapes() {
        let value = Value::from("q\" b\\ \u{8}\u{c}\n\r\t / \u{1} \u{e9}");
        assert_eq!(
            compact(&value),
            "\"q\\\" b\\\\ \\b\\f\\n\\r\\t / \\u0001 \u{e9}\""
        );
    }

    #[test]
    fn test_diagnostic_does_not_escape() {
        let value = Value::from("line\nbreak \"quoted\"");
        assert_eq!(diagnostic(&value), "\"line\nbreak \"quoted\"\"");
    }

    #[test]
    fn test_containers() {
        assert_eq!(compact(&Value::Array(vec![])), "[]");
        assert_eq!(compact(&Value::new()), "{}");
        assert_eq!(diagnostic(&Value::Array(vec![])), "[ ]");
        assert_eq!(diagnostic(&Value::new()), "{ }");

        let mut obj = Map::new();
        obj.insert("a".to_string(), Value::from(vec![Value::Null, Value::from("x")]));
        obj.insert("b".to_string(), Value::new());
        let value = Value::Object(obj);

        assert_eq!(compact(&value), r#"{"a":[null,"x"],"b":{}}"#);
        assert_eq!(diagnostic(&value), r#"{ "a": [ null, "x" ], "b": { } }"#);
    }

    #[test]
    fn test_undefined_anywhere_renders_empty() {
        assert_eq!(compact(&Value::Undefined), "");
        assert_eq!(diagnostic(&Value::Undefined), "");

        let nested = Value::Array(vec![Value::Null, Value::Array(vec![Value::Undefined])]);
        assert_eq!(compact(&nested), "");
        assert_eq!(diagnostic(&nested), "");
    }

    #[test]
    fn test_value_serializer_variants() {
        #[derive(Serialize)]
        enum Shape {
            Dot,
            Circle(f64),
            Line(u8, u8),
            Rect { w: u8, h: u8 },
        }

        assert_eq!(to_value(&Shape::Dot).unwrap(), Value::from("Dot"));
        assert_eq!(
            compact(&to_value(&Shape::Circle(1.5)).unwrap()),
            r#"{"Circle":1.500000}"#
        );
        assert_eq!(
            compact(&to_value(&Shape::Line(1, 2)).unwrap()),
            r#"{"Line":[1.000000,2.000000]}"#
        );
        assert_eq!(
            compact(&to_value(&Shape::Rect { w: 3, h: 4 }).unwrap()),
            r#"{"Rect":{"w":3.000000,"h":4.000000}}"#
        );
    }
}
