//! The JSON document tree.
//!
//! This module provides [`Value`], a tagged union over the JSON value kinds
//! plus an `Undefined` sentinel for nodes whose parse failed.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use jsonode::{TextMode, Value};
//!
//! let empty = Value::new(); // an empty object
//! let flag = Value::from(true);
//! let number = Value::from(42);
//! let parsed = Value::from_text(r#"{"a": [1, 2]}"#, TextMode::Document).unwrap();
//! let literal = Value::from_text(r#"{"a": [1, 2]}"#, TextMode::Scalar).unwrap();
//!
//! assert!(empty.is_object());
//! assert!(parsed.is_object());
//! assert!(literal.is_string());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use jsonode::Value;
//!
//! let value: Value = "[1, 2, 3]".parse().unwrap();
//! let items: Vec<Value> = value.get().unwrap();
//! assert_eq!(items.len(), 3);
//!
//! // Asking for the wrong payload is an error, never a coercion
//! assert!(value.get::<f64>().is_err());
//! ```

use crate::{Error, Map, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A node of a JSON document tree.
///
/// Arrays and objects own their children; cloning a `Value` deep-copies the
/// whole subtree. The default value is an empty object.
///
/// `Undefined` is not JSON. It marks a node whose parse failed and renders
/// as an empty string.
///
/// # Examples
///
/// ```rust
/// use jsonode::{Value, ValueType};
///
/// let mut node = Value::new();
/// node["name"] = "Alice".into();
/// node["tags"] = Value::Array(vec![]);
/// node["tags"] += "admin";
///
/// assert_eq!(node.value_type(), ValueType::Object);
/// assert_eq!(node.to_string(), r#"{ "name": "Alice", "tags": [ "admin" ] }"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    Undefined,
}

/// The discriminant of a [`Value`], with `true` and `false` as distinct kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    True,
    False,
    Number,
    String,
    Array,
    Object,
    Undefined,
}

/// How [`Value::from_text`] treats its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Parse the text as a complete JSON document.
    #[default]
    Document,
    /// Keep the text verbatim as the payload of a string node.
    Scalar,
}

impl Default for Value {
    fn default() -> Self {
        Value::Object(Map::new())
    }
}

impl Value {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a node from text.
    ///
    /// In [`TextMode::Document`] the text is parsed and a malformed document
    /// is reported as [`Error::Syntax`]. In [`TextMode::Scalar`] the text is
    /// never parsed and this always succeeds.
    ///
    /// # Errors
    ///
    /// Returns a located syntax error if document parsing fails.
    pub fn from_text(text: &str, mode: TextMode) -> Result<Self> {
        match mode {
            TextMode::Document => crate::from_str(text),
            TextMode::Scalar => Ok(Value::String(text.to_string())),
        }
    }

    /// Returns the discriminant of this node.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(true) => ValueType::True,
            Value::Bool(false) => ValueType::False,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
            Value::Undefined => ValueType::Undefined,
        }
    }

    pub(crate) const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Undefined => "undefined",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if this node was left behind by a failed parse.
    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Copies the payload out as `T`.
    ///
    /// `T` is one of `f64`, `String`, `Vec<Value>`, [`Map`] or `bool`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the node does not hold a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonode::Value;
    ///
    /// let value = Value::from(2.5);
    /// assert_eq!(value.get::<f64>().unwrap(), 2.5);
    /// assert!(value.get::<String>().is_err());
    /// ```
    pub fn get<'a, T>(&'a self) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
    {
        T::try_from(self)
    }

    /// Turns this node into `null`, dropping any payload.
    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    /// Replaces discriminant and payload in one step.
    pub fn set<T: Into<Value>>(&mut self, value: T) {
        *self = value.into();
    }

    /// Takes the value out, leaving `null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    /// Number of elements or members; `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.len()),
            Value::Object(obj) => Some(obj.len()),
            _ => None,
        }
    }

    /// `true` for an empty array or object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::True => "true",
            ValueType::False => "false",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// Writes the diagnostic form (`{ "k": [ 1.000000, true ] }`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::to_diagnostic_string(self))
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::from_str(s)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// Typed extraction, borrowing: `value.get::<T>()`
impl TryFrom<&Value> for f64 {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(*n),
            other => Err(Error::type_mismatch("number", other.type_name())),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("boolean", other.type_name())),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl TryFrom<&Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(arr) => Ok(arr.clone()),
            other => Err(Error::type_mismatch("array", other.type_name())),
        }
    }
}

impl TryFrom<&Value> for Map {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(obj.clone()),
            other => Err(Error::type_mismatch("object", other.type_name())),
        }
    }
}

// Owned extraction moves the payload out without copying
impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(arr) => Ok(arr),
            other => Err(Error::type_mismatch("array", other.type_name())),
        }
    }
}

impl TryFrom<Value> for Map {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(obj),
            other => Err(Error::type_mismatch("object", other.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
