//! Cell values and the comparison rules applied to them

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

/// A single cell value fetched from one side of a comparison.
///
/// `Null` is a real value, distinct from a missing column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    /// Exact decimal kept in normalised text form (see [`Value::decimal`])
    Decimal(String),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Blob(Vec<u8>),
}

impl Value {
    /// Build a decimal value, trimming insignificant fractional zeros so that
    /// `1.50` and `1.5` render identically.
    pub fn decimal(text: impl AsRef<str>) -> Self {
        Value::Decimal(normalize_decimal(text.as_ref()))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.parse().ok(),
            _ => None,
        }
    }

    /// Values that carry no identifying information in an all-columns key:
    /// null, empty text, and the literal zero / null spellings.
    pub fn is_blank_for_key(&self) -> bool {
        if self.is_null() {
            return true;
        }
        matches!(self.to_string().as_str(), "" | "0" | "null" | "<nil>")
    }

    /// Typed equality used when comparing matched rows.
    ///
    /// Null equals only null. Numbers compare numerically across integer,
    /// decimal and float representations. Dates, times and timestamps compare
    /// by value, and a date equals a timestamp at midnight of that day. Any
    /// other pairing falls back to comparing the canonical rendered text.
    pub fn same_as(&self, other: &Value) -> bool {
        use Value::*;

        match (self, other) {
            (Null, Null) => true,
            (Null, _) | (_, Null) => false,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Time(a), Time(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            (Date(d), Timestamp(ts)) | (Timestamp(ts), Date(d)) => {
                ts.date() == *d && ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0
            }
            (Blob(a), Blob(b)) => a == b,
            _ if self.is_numeric() && other.is_numeric() => numeric_eq(self, other),
            _ => self.to_string() == other.to_string(),
        }
    }
}

fn numeric_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.to_string() == b.to_string(),
        },
        // Integers render in normalised decimal form already
        _ => a.to_string() == b.to_string(),
    }
}

/// Trim trailing fractional zeros and a dangling point; `-0` becomes `0`.
fn normalize_decimal(text: &str) -> String {
    let text = text.trim();
    let mut out = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    };
    if out.is_empty() || out == "-" || out == "-0" {
        out = "0".to_string();
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Decimal(d) => f.write_str(d),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Blob(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i as i128)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
