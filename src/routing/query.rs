//! Query string parsing, value coercion and encoding.
//!
//! # Responsibilities
//! - Parse a form-urlencoded query string into an ordered [`RouteQuery`]
//! - Infer a [`QueryValue`] type for every raw value
//! - Encode a [`RouteQuery`] back into a query string
//!
//! # Design Decisions
//! - `"true"` and `"false"` become booleans
//! - A value becomes a number only if formatting the parsed number gives back
//!   the exact input (`"123"` and `"1.5"` do, `"007"` and `"1e5"` do not)
//! - Numbers are formatted the way a browser formats them, so `123` is
//!   written without a fractional part
//! - `"Infinity"` and `"-Infinity"` are numbers; `"NaN"` stays a string so
//!   that equal inputs always give equal values
//! - Duplicate keys keep their first position and their last value

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use url::form_urlencoded;

/// Query mapping of a location or ref, in insertion order.
pub type RouteQuery = IndexMap<String, QueryValue>;

/// A typed query-string value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl QueryValue {
    /// Infer the type of a raw query-string value.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => QueryValue::Bool(true),
            "false" => QueryValue::Bool(false),
            _ => match raw.parse::<f64>() {
                Ok(n) if !n.is_nan() && format_number(n) == raw => QueryValue::Number(n),
                _ => QueryValue::String(raw.to_owned()),
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QueryValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Number(n) => f.write_str(&format_number(*n)),
            QueryValue::String(s) => f.write_str(s),
        }
    }
}

// Integral numbers serialize as JSON integers, so `123` is not printed as `123.0`.
impl Serialize for QueryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryValue::Bool(b) => serializer.serialize_bool(*b),
            QueryValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            QueryValue::Number(n) => serializer.serialize_f64(*n),
            QueryValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        QueryValue::Number(n)
    }
}

impl From<i32> for QueryValue {
    fn from(n: i32) -> Self {
        QueryValue::Number(f64::from(n))
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Format a number the way `Number.prototype.toString` does.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Also covers -0.
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return value.to_string();
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Parse a raw query string (without the leading `?`).
pub fn parse_query(query: &str) -> RouteQuery {
    let mut parsed = RouteQuery::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        parsed.insert(key.into_owned(), QueryValue::coerce(&value));
    }
    parsed
}

/// Encode a query mapping (without the leading `?`).
pub fn encode_query(query: &RouteQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}
