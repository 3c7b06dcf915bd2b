//! Configuration for parsing and formatting.
//!
//! - [`ParseOptions`]: optional nesting limit for the parser
//! - [`FormatOptions`]: output [`Style`] and number precision for the serializer
//!
//! ## Examples
//!
//! ```rust
//! use jsonode::{to_string_with_options, FormatOptions, Value};
//!
//! let value: Value = "[1.5, true]".parse().unwrap();
//!
//! let options = FormatOptions::compact().with_precision(2);
//! assert_eq!(to_string_with_options(&value, &options), "[1.50,true]");
//!
//! let options = FormatOptions::diagnostic().with_precision(1);
//! assert_eq!(to_string_with_options(&value, &options), "[ 1.5, true ]");
//! ```

/// Number of fractional digits written for numbers by default.
pub const DEFAULT_PRECISION: usize = 6;

/// Nesting depth accepted by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Output style of the serializer.
///
/// - **Compact**: machine-oriented, re-parseable, no spacing
/// - **Diagnostic**: human-readable spacing for trace output, not meant to be re-parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Compact,
    Diagnostic,
}

/// Configuration options for serialization.
///
/// # Examples
///
/// ```rust
/// use jsonode::{FormatOptions, Style};
///
/// let options = FormatOptions::diagnostic().with_precision(3);
/// assert_eq!(options.style, Style::Diagnostic);
/// assert_eq!(options.precision, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub style: Style,
    /// Fixed number of fractional digits for numbers (`1` renders as `1.000000` at 6).
    pub precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            style: Style::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FormatOptions {
    /// Creates default options (compact, six fractional digits).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostic() -> Self {
        FormatOptions {
            style: Style::Diagnostic,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Configuration options for parsing.
///
/// The parser recurses once per nested container, so nesting is capped at
/// [`DEFAULT_MAX_DEPTH`] unless configured otherwise. `max_depth: None`
/// removes the cap; only use it for trusted input.
///
/// # Examples
///
/// ```rust
/// use jsonode::{parse_with_options, ParseError, ParseOptions, Value};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// let mut node = Value::new();
/// assert_eq!(
///     parse_with_options(&mut node, "[[[1]]]", &options),
///     Err(ParseError::DepthLimitExceeded)
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects documents whose arrays/objects nest deeper than `depth`.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
