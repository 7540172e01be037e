//! Ordered coercion rules.

use crate::value::{self, Value};
use std::fmt;

/// Rule identifies which step of the coercion chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The raw text was a JSON object, array, boolean, null or quoted string.
    Structured,
    /// Case-insensitive `true`.
    True,
    /// Case-insensitive `false`.
    False,
    /// Exact decimal rendering of an integer of up to 128 bits.
    Integer,
    /// Exact canonical rendering of a finite 64-bit float.
    Float,
    /// Nothing else matched; the raw text is kept as a string.
    Text,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Structured => "structured",
            Rule::True => "true",
            Rule::False => "false",
            Rule::Integer => "integer",
            Rule::Float => "float",
            Rule::Text => "text",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerces a raw directive string into its best-fit typed value.
///
/// The rules are tried in order and the first match wins:
///
/// 1. JSON objects, arrays, booleans, null and quoted strings, as parsed.
/// 2. `true`, any letter case.
/// 3. `false`, any letter case.
/// 4. An integer whose decimal rendering reproduces `raw` exactly; values
///    outside `i64` keep their digits as [`Value::BigInt`].
/// 5. A finite `f64` whose canonical rendering (see [`format_float`])
///    reproduces `raw` exactly.
/// 6. `raw` itself, as a string.
///
/// A bare JSON number is not accepted by rule 1; it goes through rules 4
/// and 5 so that `"007"` and `"3.50"` stay strings.
///
/// The function is total: every input maps to some value.
pub fn coerce(raw: &str) -> Value {
    coerce_with_rule(raw).0
}

/// Like [`coerce`], also reporting the rule that matched.
pub fn coerce_with_rule(raw: &str) -> (Value, Rule) {
    if let Some(parsed) = parse_structured(raw) {
        return (parsed, Rule::Structured);
    }
    if raw.eq_ignore_ascii_case("true") {
        return (Value::Bool(true), Rule::True);
    }
    if raw.eq_ignore_ascii_case("false") {
        return (Value::Bool(false), Rule::False);
    }
    if let Some(i) = parse_exact_int(raw) {
        return (Value::Int(i), Rule::Integer);
    }
    if let Some(digits) = parse_exact_wide_int(raw) {
        return (Value::BigInt(digits), Rule::Integer);
    }
    if let Some(f) = parse_exact_float(raw) {
        return (Value::Float(f), Rule::Float);
    }
    (Value::String(raw.to_string()), Rule::Text)
}

fn parse_structured(raw: &str) -> Option<Value> {
    match value::from_json(raw) {
        Ok(Value::Int(_)) | Ok(Value::BigInt(_)) | Ok(Value::Float(_)) => None,
        Ok(parsed) => Some(parsed),
        Err(_) => None,
    }
}

/// Parses `raw` as an `i64` only if rendering it back gives `raw` again.
pub fn parse_exact_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|i| i.to_string() == raw)
}

/// Like [`parse_exact_int`] for integers past the `i64` range, up to 128 bits.
pub fn parse_exact_wide_int(raw: &str) -> Option<String> {
    let exact = if raw.starts_with('-') {
        raw.parse::<i128>().ok().map(|i| i.to_string())
    } else {
        raw.parse::<u128>().ok().map(|u| u.to_string())
    };
    exact.filter(|digits| digits == raw)
}

/// Parses `raw` as a finite `f64` only if [`format_float`] gives `raw` again.
pub fn parse_exact_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .filter(|f| format_float(*f) == raw)
}

/// Canonical text of a float: the shortest decimal that reads back to the
/// same value, always with a fractional part (`1.0`, `0.25`, `-3.5`).
pub fn format_float(f: f64) -> String {
    let s = f.to_string();
    if !f.is_finite() || s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}
