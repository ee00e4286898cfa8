//! FILENAME: core/scalar/src/arith.rs
//! PURPOSE: Checked arithmetic and ordering over `Value`.
//! CONTEXT: Used by the built-in aggregations. `Empty` acts as the identity
//! for addition and multiplication so that missing measures are skipped.
//! Integer op integer stays an integer; any float operand promotes to float.

use std::cmp::Ordering;

use crate::error::{ScalarError, ScalarResult};
use crate::value::{Value, ValueKind};

impl Value {
    /// Adds two values. Text operands are rejected.
    pub fn checked_add(&self, other: &Value) -> ScalarResult<Value> {
        numeric_op(self, other, "add", i64::checked_add, |a, b| a + b)
    }

    /// Multiplies two values. Text operands are rejected.
    pub fn checked_mul(&self, other: &Value) -> ScalarResult<Value> {
        numeric_op(self, other, "mul", i64::checked_mul, |a, b| a * b)
    }

    /// Orders two values of compatible kinds.
    /// Numbers compare by value (integers widened to f64 when mixed),
    /// text compares lexically, and `Empty` sorts before everything.
    pub fn try_cmp(&self, other: &Value) -> ScalarResult<Ordering> {
        match (self, other) {
            (Value::Empty, Value::Empty) => Ok(Ordering::Equal),
            (Value::Empty, _) => Ok(Ordering::Less),
            (_, Value::Empty) => Ok(Ordering::Greater),

            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (a, b) = (a.to_f64()?, b.to_f64()?);
                Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
            }

            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Text(_), b) => Err(ScalarError::mismatch(ValueKind::Text, b)),
            (a, _) => Err(ScalarError::mismatch(ValueKind::Text, a)),
        }
    }
}

fn numeric_op(
    lhs: &Value,
    rhs: &Value,
    op: &'static str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> ScalarResult<Value> {
    match (lhs, rhs) {
        (Value::Empty, other) | (other, Value::Empty) => {
            if other.is_empty() || other.is_numeric() {
                Ok(other.clone())
            } else {
                Err(ScalarError::mismatch(ValueKind::Float, other))
            }
        }
        (Value::Integer(a), Value::Integer(b)) => int_op(*a, *b)
            .map(Value::Integer)
            .ok_or(ScalarError::Overflow { op }),
        (a, b) => Ok(Value::Float(float_op(a.to_f64()?, b.to_f64()?))),
    }
}
