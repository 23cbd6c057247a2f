//! Raw entries and their typed interpretations.
//!
//! A parsed document never stores a resolved type. Each key maps to an
//! [`Entry`], which keeps the trimmed source text and whether it was quoted.
//! Types are worked out on demand:
//!
//! - [`Entry::coerce`] asks for one specific [`ValueKind`] and either gets
//!   that variant or `None`
//! - [`Entry::value`] returns the most specific variant that succeeds, trying
//!   Boolean, Integer, Float, String and finally Raw
//!
//! ## Coercion rules
//!
//! | Kind | Accepted raw text |
//! |------|-------------------|
//! | Boolean | `y`, `yes`, `true`, `on` / `n`, `no`, `false`, `off` (case-sensitive) |
//! | Integer | `u64` in decimal, or with a `0x`, `0o`, `0b` prefix; no sign |
//! | Float | optional sign, digits with optional fraction, optional exponent |
//! | String | quoted source only; quotes stripped, escapes resolved |
//! | Raw | always; the exact trimmed source text |
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Entry, Value, ValueKind};
//!
//! let entry = Entry::new("5432");
//! assert_eq!(entry.value(), Value::Integer(5432));
//! assert_eq!(entry.coerce(ValueKind::Float), Some(Value::Float(5432.0)));
//! assert_eq!(entry.coerce(ValueKind::Boolean), None);
//! assert_eq!(entry.coerce(ValueKind::String), None);
//!
//! let quoted = Entry::new("\"a\\tb\"");
//! assert_eq!(quoted.raw(), "\"a\\tb\"");
//! assert_eq!(quoted.value(), Value::String("a\tb".to_string()));
//! ```

use crate::escape;
use serde::{Serialize, Serializer};
use std::fmt;

/// The quote character that delimited a value in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    pub(crate) fn from_char(ch: char) -> Option<Quote> {
        match ch {
            '\'' => Some(Quote::Single),
            '"' => Some(Quote::Double),
            _ => None,
        }
    }
}

/// The type a caller asks an [`Entry`] to be read as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Raw,
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueKind {
    /// Kinds in the order [`Entry::value`] tries them.
    pub const PRECEDENCE: [ValueKind; 5] = [
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::Raw,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::Raw => "raw",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value as it appeared in the source, before any interpretation.
///
/// Entries are immutable. Every coercion method is pure, so asking twice
/// gives the same answer.
///
/// # Examples
///
/// ```rust
/// use inidoc::{Entry, Quote};
///
/// let entry = Entry::new("'hello'");
/// assert_eq!(entry.quote(), Some(Quote::Single));
/// assert_eq!(entry.as_string().as_deref(), Some("hello"));
///
/// let entry = Entry::new("hello");
/// assert!(!entry.is_quoted());
/// assert_eq!(entry.as_string(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    raw: String,
    quote: Option<Quote>,
}

impl Entry {
    /// Creates an entry from source text, detecting quoting the way the
    /// parser does: the text is quoted when it starts with `"` or `'`, its
    /// first unescaped matching quote is its last character, and every escape
    /// in between is valid.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let quote = detect_quote(&raw);
        Entry { raw, quote }
    }

    /// Creates an entry whose quoting the lexer has already validated.
    pub(crate) fn from_parts(raw: String, quote: Option<Quote>) -> Self {
        Entry { raw, quote }
    }

    /// The exact trimmed source text, quotes included.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn quote(&self) -> Option<Quote> {
        self.quote
    }

    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.quote.is_some()
    }

    /// Reads the entry as a boolean.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Entry;
    ///
    /// assert_eq!(Entry::new("yes").as_bool(), Some(true));
    /// assert_eq!(Entry::new("off").as_bool(), Some(false));
    /// assert_eq!(Entry::new("True").as_bool(), None);
    /// assert_eq!(Entry::new("maybe").as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        parse_bool(&self.raw)
    }

    /// Reads the entry as an unsigned 64-bit integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Entry;
    ///
    /// assert_eq!(Entry::new("42").as_u64(), Some(42));
    /// assert_eq!(Entry::new("0xff").as_u64(), Some(255));
    /// assert_eq!(Entry::new("0b101").as_u64(), Some(5));
    /// assert_eq!(Entry::new("-1").as_u64(), None);
    /// assert_eq!(Entry::new("42px").as_u64(), None);
    /// ```
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        parse_u64(&self.raw)
    }

    /// Reads the entry as a finite 64-bit float.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::Entry;
    ///
    /// assert_eq!(Entry::new("-2.5e3").as_f64(), Some(-2500.0));
    /// assert_eq!(Entry::new("7").as_f64(), Some(7.0));
    /// assert_eq!(Entry::new("inf").as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        parse_f64(&self.raw)
    }

    /// Returns the unquoted, unescaped text of a quoted entry.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        let quote = self.quote?;
        let body = self
            .raw
            .strip_prefix(quote.as_char())?
            .strip_suffix(quote.as_char())?;
        escape::unescape(body).ok()
    }

    /// Interprets the entry as exactly `kind`.
    #[must_use]
    pub fn coerce(&self, kind: ValueKind) -> Option<Value> {
        match kind {
            ValueKind::Raw => Some(Value::Raw(self.raw.clone())),
            ValueKind::String => self.as_string().map(Value::String),
            ValueKind::Integer => self.as_u64().map(Value::Integer),
            ValueKind::Float => self.as_f64().map(Value::Float),
            ValueKind::Boolean => self.as_bool().map(Value::Boolean),
        }
    }

    /// Returns the most specific interpretation, following
    /// [`ValueKind::PRECEDENCE`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inidoc::{Entry, Value};
    ///
    /// assert_eq!(Entry::new("on").value(), Value::Boolean(true));
    /// assert_eq!(Entry::new("1").value(), Value::Integer(1));
    /// assert_eq!(Entry::new("-1").value(), Value::Float(-1.0));
    /// assert_eq!(Entry::new("\"1\"").value(), Value::String("1".to_string()));
    /// assert_eq!(Entry::new("localhost").value(), Value::Raw("localhost".to_string()));
    /// ```
    #[must_use]
    pub fn value(&self) -> Value {
        ValueKind::PRECEDENCE
            .iter()
            .find_map(|kind| self.coerce(*kind))
            .unwrap_or_else(|| Value::Raw(self.raw.clone()))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Entry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

fn detect_quote(raw: &str) -> Option<Quote> {
    let quote = Quote::from_char(raw.chars().next()?)?;
    let rest = &raw[quote.as_char().len_utf8()..];
    let close = escape::find_closing_quote(rest, quote.as_char())?;
    if close + quote.as_char().len_utf8() != rest.len() {
        return None;
    }
    escape::unescape(&rest[..close]).ok().map(|_| quote)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "y" | "yes" | "true" | "on" => Some(true),
        "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64(raw: &str) -> Option<u64> {
    let (digits, radix) = match raw.get(..2) {
        Some("0x") | Some("0X") => (&raw[2..], 16),
        Some("0o") | Some("0O") => (&raw[2..], 8),
        Some("0b") | Some("0B") => (&raw[2..], 2),
        _ => (raw, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn parse_f64(raw: &str) -> Option<f64> {
    let bytes = raw.as_bytes();
    let mut pos = 0;
    let skip_digits = |pos: &mut usize| {
        let start = *pos;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
        *pos - start
    };

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }
    let mut mantissa_digits = skip_digits(&mut pos);
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        mantissa_digits += skip_digits(&mut pos);
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        if skip_digits(&mut pos) == 0 {
            return None;
        }
    }
    if pos != bytes.len() {
        return None;
    }

    raw.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// A typed interpretation of an [`Entry`].
///
/// # Examples
///
/// ```rust
/// use inidoc::{Value, ValueKind};
///
/// let value = Value::Integer(8080);
/// assert_eq!(value.kind(), ValueKind::Integer);
/// assert_eq!(value.as_u64(), Some(8080));
/// assert_eq!(value.to_string(), "8080");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The source text as written
    Raw(String),
    /// A quoted value with quotes stripped and escapes resolved
    String(String),
    Integer(u64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Raw(_) => ValueKind::Raw,
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns the text of a `Raw` or `String` value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Raw(s) | Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a `Float`, or an `Integer` widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Raw(s) | Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Raw(s) | Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_u64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_sets() {
        for raw in ["y", "yes", "true", "on"] {
            assert_eq!(Entry::new(raw).as_bool(), Some(true), "{}", raw);
        }
        for raw in ["n", "no", "false", "off"] {
            assert_eq!(Entry::new(raw).as_bool(), Some(false), "{}", raw);
        }
        for raw in ["maybe", "YES", "1", ""] {
            assert_eq!(Entry::new(raw).as_bool(), None, "{}", raw);
        }
    }

    #[test]
    fn test_integer_edges() {
        assert_eq!(parse_u64("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64("18446744073709551616"), None);
        assert_eq!(parse_u64("0o17"), Some(15));
        assert_eq!(parse_u64("0XFF"), Some(255));
        assert_eq!(parse_u64("0x"), None);
        assert_eq!(parse_u64("+5"), None);
        assert_eq!(parse_u64(" 5"), None);
        assert_eq!(parse_u64("1_000"), None);
        assert_eq!(parse_u64("0b102"), None);
    }

    #[test]
    fn test_float_grammar() {
        assert_eq!(parse_f64("3.25"), Some(3.25));
        assert_eq!(parse_f64("+.5"), Some(0.5));
        assert_eq!(parse_f64("1."), Some(1.0));
        assert_eq!(parse_f64("1E-2"), Some(0.01));
        assert_eq!(parse_f64("."), None);
        assert_eq!(parse_f64("1e"), None);
        assert_eq!(parse_f64("1.5x"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("infinity"), None);
        assert_eq!(parse_f64("1e999"), None);
        assert_eq!(parse_f64("0x10"), None);
    }

    #[test]
    fn test_coerce_never_falls_back() {
        let entry = Entry::new("localhost");
        assert_eq!(entry.coerce(ValueKind::Integer), None);
        assert_eq!(entry.coerce(ValueKind::String), None);
        assert_eq!(
            entry.coerce(ValueKind::Raw),
            Some(Value::Raw("localhost".to_string()))
        );
    }

    #[test]
    fn test_quoted_numbers_are_strings() {
        let entry = Entry::new("\"42\"");
        assert_eq!(entry.as_u64(), None);
        assert_eq!(entry.value(), Value::String("42".to_string()));
        assert_eq!(entry.coerce(ValueKind::Raw).unwrap().as_str(), Some("\"42\""));
    }

    #[test]
    fn test_detect_quote() {
        assert_eq!(Entry::new("\"a\"").quote(), Some(Quote::Double));
        assert_eq!(Entry::new("''").quote(), Some(Quote::Single));
        assert_eq!(Entry::new("\"a\" b").quote(), None);
        assert_eq!(Entry::new("\"a\\\"").quote(), None);
        assert_eq!(Entry::new("\"\\q\"").quote(), None);
        assert_eq!(Entry::new("\"").quote(), None);
        assert_eq!(Entry::new("it's").quote(), None);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Raw("x".into()).as_str(), Some("x"));
        assert!(Value::Boolean(true).is_boolean());
        assert_eq!(Value::from(2.5).kind(), ValueKind::Float);
    }

    #[test]
    fn test_serialize_preferred_value() {
        assert_eq!(serde_json::to_string(&Entry::new("8080")).unwrap(), "8080");
        assert_eq!(serde_json::to_string(&Entry::new("off")).unwrap(), "false");
        assert_eq!(
            serde_json::to_string(&Entry::new("'a b'")).unwrap(),
            "\"a b\""
        );
    }
}
