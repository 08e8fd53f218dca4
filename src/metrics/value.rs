//! Sample values at the API boundary and as stored in a metric set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw sample as handed in by an integration.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Boolean, coerced to 1.0/0.0 for numeric kinds
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer, typically a byte or packet counter
    UInt(u64),
    /// Floating point
    Float(f64),
    /// String
    Text(String),
}

impl RawValue {
    /// Coerce to a float. `None` for text.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            RawValue::Int(i) => Some(*i as f64),
            RawValue::UInt(u) => Some(*u as f64),
            RawValue::Float(f) => Some(*f),
            RawValue::Text(_) => None,
        }
    }

    /// Borrow the string. `None` for anything else.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

macro_rules! raw_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for RawValue {
            fn from(v: $t) -> Self {
                RawValue::Int(i64::from(v))
            }
        })*
    };
}

raw_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for RawValue {
    fn from(v: u64) -> Self {
        RawValue::UInt(v)
    }
}

impl From<usize> for RawValue {
    fn from(v: usize) -> Self {
        RawValue::UInt(v as u64)
    }
}

impl From<isize> for RawValue {
    fn from(v: isize) -> Self {
        RawValue::Int(v as i64)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        RawValue::Float(f64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

/// A computed value held by a metric set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Gauge, rate or delta
    Number(f64),
    /// Attribute
    Text(String),
}

impl MetricValue {
    /// The number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            MetricValue::Number(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}
