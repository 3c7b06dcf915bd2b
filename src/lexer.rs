//! Lexical primitives shared by the parser.
//!
//! A [`Cursor`] walks the input forward only. Each primitive either consumes
//! exactly the text it recognises and returns `Ok`, or returns the
//! [`ParseError`] describing the violation. The only lookahead past a
//! consumed character is the `\uXXXX` that must follow a high surrogate.

use crate::ParseError;

type Scan<T> = std::result::Result<T, ParseError>;

/// Forward-only position in the input text.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes one whole character (one to four bytes of UTF-8).
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `byte` if it is next.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek_byte() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Skips space, tab, newline and carriage return. Nothing else is whitespace.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek_byte() {
            self.position += 1;
        }
    }

    /// Consumes `literal` exactly (case-sensitive).
    pub(crate) fn expect_literal(&mut self, literal: &str) -> Scan<()> {
        if self.input[self.position..].starts_with(literal) {
            self.position += literal.len();
            Ok(())
        } else {
            Err(ParseError::InvalidValue)
        }
    }

    /// Consumes a number and converts it to `f64`.
    ///
    /// Only the longest prefix matching the number grammar is consumed;
    /// whatever follows is left for the caller to judge (so `01` consumes
    /// `0` and leaves `1`).
    pub(crate) fn number(&mut self) -> Scan<f64> {
        let rest = &self.input[self.position..];
        let len = number_len(rest.as_bytes()).ok_or(ParseError::InvalidValue)?;

        let value: f64 = rest[..len]
            .parse()
            .map_err(|_| ParseError::InvalidValue)?;
        if value.is_infinite() {
            return Err(ParseError::NumberTooBig);
        }

        self.position += len;
        Ok(value)
    }

    /// Decodes the four hex digits after `\u` (and a trailing low surrogate
    /// escape when the first unit is a high surrogate), appending the
    /// resulting character to `out`.
    ///
    /// The cursor must sit just past the `u`.
    pub(crate) fn unicode_escape(&mut self, out: &mut String) -> Scan<()> {
        let unit = self.hex4()?;

        let code_point = match unit {
            0xD800..=0xDBFF => {
                if !self.input[self.position..].starts_with("\\u") {
                    return Err(ParseError::InvalidUnicodeSurrogate);
                }
                self.position += 2;

                let low = self.hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ParseError::InvalidUnicodeSurrogate);
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            // A low surrogate cannot start a pair
            0xDC00..=0xDFFF => return Err(ParseError::InvalidUnicodeSurrogate),
            _ => unit,
        };

        let ch = char::from_u32(code_point).ok_or(ParseError::InvalidUnicodeSurrogate)?;
        out.push(ch);
        Ok(())
    }

    fn hex4(&mut self) -> Scan<u32> {
        let digits = self
            .input
            .as_bytes()
            .get(self.position..self.position + 4)
            .ok_or(ParseError::InvalidUnicodeHex)?;

        let mut unit = 0u32;
        for &byte in digits {
            let digit = char::from(byte)
                .to_digit(16)
                .ok_or(ParseError::InvalidUnicodeHex)?;
            unit = (unit << 4) | digit;
        }

        self.position += 4;
        Ok(unit)
    }

    /// 1-based line and column of byte offset `offset`.
    pub(crate) fn line_col(&self, offset: usize) -> (usize, usize) {
        let consumed = &self.input[..offset.min(self.input.len())];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Length of the longest prefix of `bytes` that is a JSON number:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn number_len(bytes: &[u8]) -> Option<usize> {
    let digit_at = |i: usize| bytes.get(i).map_or(false, u8::is_ascii_digit);
    let mut p = 0;

    if bytes.first() == Some(&b'-') {
        p += 1;
    }

    match bytes.get(p) {
        Some(b'0') => p += 1,
        Some(b'1'..=b'9') => {
            while digit_at(p) {
                p += 1;
            }
        }
        _ => return None,
    }

    if bytes.get(p) == Some(&b'.') {
        p += 1;
        if !digit_at(p) {
            return None;
        }
        while digit_at(p) {
            p += 1;
        }
    }

    if let Some(b'e' | b'E') = bytes.get(p) {
        p += 1;
        if let Some(b'+' | b'-') = bytes.get(p) {
            p += 1;
        }
        if !digit_at(p) {
            return None;
        }
        while digit_at(p) {
            p += 1;
        }
    }

    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_number(text: &str) -> (Scan<f64>, usize) {
        let mut cursor = Cursor::new(text);
        let result = cursor.number();
        (result, cursor.position())
    }

    fn decode(escape: &str) -> Scan<String> {
        let mut cursor = Cursor::new(escape);
        let mut out = String::new();
        cursor.unicode_escape(&mut out).map(|_| out)
    }

    #[test]
    fn test_whitespace_set() {
        let mut cursor = Cursor::new(" \t\r\n x");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek_char(), Some('x'));

        // Form feed and non-breaking space are not whitespace
        let mut cursor = Cursor::new("\u{000C}\u{00A0}");
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_literals() {
        let mut cursor = Cursor::new("null");
        assert_eq!(cursor.expect_literal("null"), Ok(()));
        assert!(cursor.at_end());

        let mut cursor = Cursor::new("nul");
        assert_eq!(cursor.expect_literal("null"), Err(ParseError::InvalidValue));
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new("True");
        assert_eq!(cursor.expect_literal("true"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_number_grammar() {
        assert_eq!(scan_number("0"), (Ok(0.0), 1));
        assert_eq!(scan_number("-0.5e10"), (Ok(-0.5e10), 7));
        assert_eq!(scan_number("12.25E-2"), (Ok(0.1225), 8));
        assert_eq!(scan_number("1e+3"), (Ok(1000.0), 4));

        // Consumes only the grammatical prefix
        assert_eq!(scan_number("01"), (Ok(0.0), 1));
        assert_eq!(scan_number("7,8"), (Ok(7.0), 1));
        assert_eq!(scan_number("3]"), (Ok(3.0), 1));

        for bad in ["1.", "-", "+1", ".5", "1e", "1e+", "abc", "-x", "1.e3"] {
            assert_eq!(scan_number(bad), (Err(ParseError::InvalidValue), 0), "{bad}");
        }
    }

    #[test]
    fn test_number_too_big() {
        assert_eq!(scan_number("1e309").0, Err(ParseError::NumberTooBig));
        assert_eq!(scan_number("-1e400").0, Err(ParseError::NumberTooBig));
        assert!(scan_number("1.7976931348623157e308").0.is_ok());
    }

    #[test]
    fn test_unicode_bmp() {
        assert_eq!(decode("0041").unwrap(), "A");
        assert_eq!(decode("00e9").unwrap(), "\u{e9}");
        assert_eq!(decode("20AC").unwrap(), "\u{20AC}");
        assert_eq!(decode("20AC").unwrap().len(), 3);
    }

    #[test]
    fn test_unicode_surrogate_pair() {
        let decoded = decode("D83D\\uDE00").unwrap();
        assert_eq!(decoded, "\u{1F600}");
        assert_eq!(decoded.as_bytes(), &[0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn test_unicode_errors() {
        assert_eq!(decode("D800"), Err(ParseError::InvalidUnicodeSurrogate));
        assert_eq!(decode("D800x"), Err(ParseError::InvalidUnicodeSurrogate));
        assert_eq!(decode("D800\\u0041"), Err(ParseError::InvalidUnicodeSurrogate));
        assert_eq!(decode("DC00"), Err(ParseError::InvalidUnicodeSurrogate));
        assert_eq!(decode("D800\\uZZZZ"), Err(ParseError::InvalidUnicodeHex));
        assert_eq!(decode("12G4"), Err(ParseError::InvalidUnicodeHex));
        assert_eq!(decode("12"), Err(ParseError::InvalidUnicodeHex));
    }

    #[test]
    fn test_line_col() {
        let cursor = Cursor::new("[\n  1,\n  x]");
        assert_eq!(cursor.line_col(0), (1, 1));
        assert_eq!(cursor.line_col(4), (2, 3));
        assert_eq!(cursor.line_col(9), (3, 3));
    }
}
