//! JSON parsing.
//!
//! This module provides the recursive-descent [`Parser`] that turns text
//! into a [`Value`] tree, and [`ValueDeserializer`], which lets any
//! `T: Deserialize` be read out of an already-built tree.
//!
//! ## Overview
//!
//! - **Single pass**: one forward-only cursor, no backtracking
//! - **Fail fast**: the first violation aborts the whole parse; no partial tree is returned
//! - **Strict grammar**: no comments, no trailing commas, no leading zeros
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use jsonode::{from_str, parse, Value};
//!
//! let value: Value = from_str(r#"{"x": [1, 2.5, "é"]}"#).unwrap();
//! assert_eq!(value["x"][2].as_str(), Some("\u{e9}"));
//!
//! let mut node = Value::new();
//! parse(&mut node, "123 abc").unwrap_err();
//! assert!(node.is_undefined());
//! ```

use crate::lexer::Cursor;
use crate::{Error, Map, ParseError, ParseOptions, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

type Parsed<T> = std::result::Result<T, ParseError>;

/// The JSON parser.
///
/// Created via [`Parser::new`]; consumed by [`Parser::parse_document`].
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    max_depth: Option<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(input),
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Parses the whole input as one root value surrounded by optional whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation. Trailing non-whitespace after a
    /// complete value is [`ParseError::RootNotSingular`].
    pub fn parse_document(&mut self) -> Parsed<Value> {
        self.cursor.skip_whitespace();
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();

        if self.cursor.at_end() {
            Ok(value)
        } else {
            Err(ParseError::RootNotSingular)
        }
    }

    /// Byte offset of the cursor; after a failure, where the violation was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.position()
    }

    /// Attaches the cursor's line and column to `code`.
    #[must_use]
    pub fn located(&self, code: ParseError) -> Error {
        let (line, column) = self.cursor.line_col(self.cursor.position());
        Error::syntax(code, line, column)
    }

    fn parse_value(&mut self) -> Parsed<Value> {
        match self.cursor.peek_byte() {
            Some(b'n') => self.cursor.expect_literal("null").map(|_| Value::Null),
            Some(b't') => self.cursor.expect_literal("true").map(|_| Value::Bool(true)),
            Some(b'f') => self.cursor.expect_literal("false").map(|_| Value::Bool(false)),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            None => Err(ParseError::ExpectValue),
            Some(_) => self.cursor.number().map(Value::Number),
        }
    }

    fn parse_string(&mut self) -> Parsed<String> {
        self.cursor.eat(b'"');
        let mut result = String::new();

        loop {
            let ch = self.cursor.next_char().ok_or(ParseError::MissQuotationMark)?;
            match ch {
                '"' => return Ok(result),
                '\\' => match self.cursor.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('/') => result.push('/'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('u') => self.cursor.unicode_escape(&mut result)?,
                    Some(_) => return Err(ParseError::InvalidStringEscape),
                    None => return Err(ParseError::MissQuotationMark),
                },
                c if (c as u32) < 0x20 => return Err(ParseError::InvalidStringChar),
                c => result.push(c),
            }
        }
    }

    fn enter(&mut self) -> Parsed<()> {
        self.depth += 1;
        log::trace!("entering container at depth {}", self.depth);
        match self.max_depth {
            Some(max) if self.depth > max => Err(ParseError::DepthLimitExceeded),
            _ => Ok(()),
        }
    }

    fn parse_array(&mut self) -> Parsed<Value> {
        self.enter()?;
        self.cursor.eat(b'[');
        self.cursor.skip_whitespace();

        let mut elements = Vec::new();
        if self.cursor.eat(b']') {
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);
            self.cursor.skip_whitespace();

            if self.cursor.eat(b',') {
                self.cursor.skip_whitespace();
            } else if self.cursor.eat(b']') {
                self.depth -= 1;
                return Ok(Value::Array(elements));
            } else {
                return Err(ParseError::MissCommaOrSquareBracket);
            }
        }
    }

    fn parse_object(&mut self) -> Parsed<Value> {
        self.enter()?;
        self.cursor.eat(b'{');
        self.cursor.skip_whitespace();

        let mut members = Map::new();
        if self.cursor.eat(b'}') {
            self.depth -= 1;
            return Ok(Value::Object(members));
        }

        loop {
            if self.cursor.peek_byte() != Some(b'"') {
                return Err(ParseError::MissKey);
            }
            let key = self.parse_string()?;

            self.cursor.skip_whitespace();
            if !self.cursor.eat(b':') {
                return Err(ParseError::MissColon);
            }
            self.cursor.skip_whitespace();

            let value = self.parse_value()?;
            // Later duplicates overwrite earlier ones
            members.insert(key, value);

            self.cursor.skip_whitespace();
            if self.cursor.eat(b',') {
                self.cursor.skip_whitespace();
            } else if self.cursor.eat(b'}') {
                self.depth -= 1;
                return Ok(Value::Object(members));
            } else {
                return Err(ParseError::MissCommaOrCurlyBracket);
            }
        }
    }
}

/// Reads a `T: Deserialize` out of a [`Value`] tree.
///
/// Created by [`from_value`](crate::from_value).
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            // `u64::MAX as f64` is 2^64, one past the largest u64
            // Whole numbers go through the integer visitors so integer fields accept them
            Value::Number(n) if n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 => {
                visitor.visit_u64(n as u64)
            }
            Value::Number(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < 0.0 => {
                visitor.visit_i64(n as i64)
            }
            Value::Number(n) => visitor.visit_f64(n),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            Value::Undefined => Err(Error::custom("cannot deserialize an undefined value")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) if obj.len() == 1 => {
                let mut members = obj.into_iter();
                match members.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            _ => Err(Error::custom("Expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
