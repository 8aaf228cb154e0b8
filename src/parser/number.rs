//! Numeric coercion for form-entered values.
//!
//! Every numeric quote field may arrive as a number, a string (possibly empty
//! or with trailing junk), `null`, or be missing entirely. All of them are
//! funnelled through [`to_number_or_zero`] so that arithmetic never sees NaN
//! or an infinity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Coerce any JSON value to a finite number, falling back to zero.
///
/// Strings use `parseFloat` prefix semantics: `"12.5g"` is 12.5, `".5"` is 0.5,
/// `""` and `"abc"` are 0. Booleans, arrays, objects and `null` are 0.
pub fn to_number_or_zero(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    finite_or_zero(n.unwrap_or(0.0))
}

/// Collapse NaN, infinities and negative zero to `0.0`.
#[inline]
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() && n != 0.0 {
        n
    } else {
        0.0
    }
}

/// Parse the longest numeric prefix of a string.
///
/// Leading whitespace is skipped. Returns `None` when no digits are found.
/// An overflowing literal comes back as an infinity; callers collapse it.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[pos..end];
        }
    }

    let literal = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent
    );
    literal.parse().ok()
}

/// A coerced, always-finite numeric form value.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Wrap a number, collapsing non-finite values to zero.
    pub fn new(n: f64) -> Self {
        Amount(finite_or_zero(n))
    }

    /// Coerce raw form text.
    pub fn parse(raw: &str) -> Self {
        Amount(finite_or_zero(parse_float_prefix(raw).unwrap_or(0.0)))
    }

    /// Coerce an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        Amount(to_number_or_zero(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::new(n)
    }
}

impl From<Amount> for f64 {
    fn from(a: Amount) -> Self {
        a.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Amount::from_value(&value))
    }
}
