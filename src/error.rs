//! Error types for parsing and for working with [`Value`](crate::Value) trees.
//!
//! There are two families:
//!
//! - [`ParseError`]: the status of a failed parse. Recoverable; the target
//!   node is left [`Undefined`](crate::Value::Undefined) and the caller
//!   decides what to do next.
//! - [`Error`]: everything else. Located syntax errors from [`from_str`](crate::from_str),
//!   type mismatches from typed getters, and misuse of the accessor API
//!   (wrong receiver type, missing key, index out of bounds).
//!
//! ## Examples
//!
//! ```rust
//! use jsonode::{parse, ParseError, Value};
//!
//! let mut node = Value::new();
//! assert_eq!(parse(&mut node, "[1, 2"), Err(ParseError::MissCommaOrSquareBracket));
//! assert!(node.is_undefined());
//! ```

use std::fmt;
use thiserror::Error;

/// Why a parse failed.
///
/// One variant per grammar violation the parser can detect. A successful
/// parse is reported as `Ok(())`, so there is no `Ok` variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// The input (or the remainder where a value was required) is empty or whitespace.
    #[error("expected a value")]
    ExpectValue,

    /// Malformed literal or number, or a parse into a node left undefined by an earlier failure.
    #[error("invalid value")]
    InvalidValue,

    /// Non-whitespace text follows the root value.
    #[error("the root value is followed by more text")]
    RootNotSingular,

    /// The number is well-formed but does not fit in an `f64`.
    #[error("number too big")]
    NumberTooBig,

    /// End of input inside a string.
    #[error("missing closing quotation mark")]
    MissQuotationMark,

    /// Raw control character (below U+0020) inside a string.
    #[error("invalid character in string")]
    InvalidStringChar,

    /// Backslash followed by a character that is not a known escape.
    #[error("invalid string escape")]
    InvalidStringEscape,

    /// `\u` not followed by four hexadecimal digits.
    #[error("invalid unicode hex digits")]
    InvalidUnicodeHex,

    /// Unpaired or out-of-range UTF-16 surrogate.
    #[error("invalid unicode surrogate")]
    InvalidUnicodeSurrogate,

    /// An array element is followed by something other than `,` or `]`.
    #[error("missing comma or square bracket")]
    MissCommaOrSquareBracket,

    /// An object member does not start with a quoted key.
    #[error("missing object key")]
    MissKey,

    /// An object key is not followed by `:`.
    #[error("missing colon")]
    MissColon,

    /// An object member is followed by something other than `,` or `}`.
    #[error("missing comma or curly bracket")]
    MissCommaOrCurlyBracket,

    /// Containers nest deeper than [`ParseOptions::max_depth`](crate::ParseOptions).
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
}

/// Represents all errors surfaced by the crate outside of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A parse failure with the position where it was detected.
    #[error("Syntax error at line {line}, column {column}: {code}")]
    Syntax {
        code: ParseError,
        line: usize,
        column: usize,
    },

    /// A typed getter was asked for a payload the node does not hold.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An accessor or mutator was applied to a node of the wrong kind.
    #[error("Wrong type: operation requires {expected}, node is {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// Read-only keyed access on an absent key.
    #[error("Key not found: {0:?}")]
    KeyNotFound(String),

    /// Indexed access past the end of an array.
    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a located syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonode::{Error, ParseError};
    ///
    /// let err = Error::syntax(ParseError::MissColon, 3, 7);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(code: ParseError, line: usize, column: usize) -> Self {
        Error::Syntax { code, line, column }
    }

    /// Returns the parse status code if this is a syntax error.
    #[must_use]
    pub fn parse_code(&self) -> Option<ParseError> {
        match self {
            Error::Syntax { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub(crate) fn wrong_type(expected: &'static str, found: &'static str) -> Self {
        Error::WrongType { expected, found }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
