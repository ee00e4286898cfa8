//! FILENAME: core/scalar/src/value.rs
//! PURPOSE: Defines the dynamically-typed scalar stored in cube coordinates and measures.
//! CONTEXT: Every point coordinate and every measure value is a `Value`.
//! Equality is exact (type and value), so `Integer(1)` and `Float(1.0)` are
//! different keys. Floats compare with NaN == NaN so that `Value` is `Eq` and
//! can be used as a hash key with the same semantics as a linear scan.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ScalarError, ScalarResult};

/// The variant tag of a `Value`, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Empty,
    Integer,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Empty => "empty",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single coordinate or measure value.
///
/// Serialized untagged: JSON `null` is `Empty`, integral numbers are
/// `Integer`, other numbers are `Float` and strings are `Text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    #[default]
    Empty,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Extracts an integer. Floats are not truncated.
    pub fn as_i64(&self) -> ScalarResult<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(ScalarError::mismatch(ValueKind::Integer, other)),
        }
    }

    /// Extracts a float. Integers are rejected; use `to_f64` to widen.
    pub fn as_f64(&self) -> ScalarResult<f64> {
        match self {
            Value::Float(n) => Ok(*n),
            other => Err(ScalarError::mismatch(ValueKind::Float, other)),
        }
    }

    /// Reads any numeric value as f64.
    pub fn to_f64(&self) -> ScalarResult<f64> {
        match self {
            Value::Integer(i) => Ok(*i as f64),
            Value::Float(n) => Ok(*n),
            other => Err(ScalarError::mismatch(ValueKind::Float, other)),
        }
    }

    pub fn as_str(&self) -> ScalarResult<&str> {
        match self {
            Value::Text(s) => Ok(s.as_str()),
            other => Err(ScalarError::mismatch(ValueKind::Text, other)),
        }
    }
}

// ============================================================================
// EQUALITY & HASHING
// ============================================================================

/// Float equality with NaN equal to itself.
fn float_eq(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Empty => {}
            Value::Integer(i) => i.hash(state),
            Value::Float(n) => {
                if n.is_nan() {
                    // All NaN values hash to the same thing
                    u64::MAX.hash(state);
                } else if *n == 0.0 {
                    // -0.0 == 0.0, so they must hash alike
                    0u64.hash(state);
                } else {
                    n.to_bits().hash(state);
                }
            }
            Value::Text(s) => s.hash(state),
        }
    }
}

// ============================================================================
// DISPLAY & CONVERSIONS
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}
