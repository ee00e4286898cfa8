//! FILENAME: core/cube-engine/src/aggregate.rs
//! Aggregation - How roll-up combines measure tuples.
//!
//! `Aggregator` is the caller-extensible contract used by `Cube::roll_up`:
//! it receives the current aggregate of a group and the measure tuple of one
//! source row, and returns the new aggregate. Any closure with the matching
//! signature is an aggregator.
//!
//! `Aggregation` lists the built-in single-value reductions used by
//! declarative roll-up definitions.

use std::cmp::Ordering;

use scalar::{ScalarResult, Value};
use serde::{Deserialize, Serialize};

// ============================================================================
// AGGREGATOR CONTRACT
// ============================================================================

/// Combines an accumulated measure tuple with the measure tuple of one row.
///
/// `current` has one entry per output field of the roll-up; `row` is the
/// source row's measure tuple, in the source cube's field order. The returned
/// tuple replaces the stored aggregate and must have as many entries as
/// `current`.
pub trait Aggregator {
    fn aggregate(&self, current: &[Value], row: &[Value]) -> ScalarResult<Vec<Value>>;
}

impl<F> Aggregator for F
where
    F: Fn(&[Value], &[Value]) -> ScalarResult<Vec<Value>>,
{
    fn aggregate(&self, current: &[Value], row: &[Value]) -> ScalarResult<Vec<Value>> {
        self(current, row)
    }
}

// ============================================================================
// BUILT-IN AGGREGATIONS
// ============================================================================

/// Supported single-value reductions for roll-up measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    Sum,
    Count,
    Min,
    Max,
    Product,
    First,
    Last,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation::Sum
    }
}

impl Aggregation {
    /// Starting aggregate for a new group.
    pub fn initial_value(&self) -> Value {
        match self {
            Aggregation::Sum | Aggregation::Count => Value::Integer(0),
            Aggregation::Product => Value::Integer(1),
            Aggregation::Min | Aggregation::Max | Aggregation::First | Aggregation::Last => {
                Value::Empty
            }
        }
    }

    /// Folds one source value into the current aggregate.
    ///
    /// `source` is `None` when the measure has no source field (row count).
    /// Empty source values are skipped by every reduction.
    pub fn step(&self, current: &Value, source: Option<&Value>) -> ScalarResult<Value> {
        let value = match source {
            Some(value) if value.is_empty() => return Ok(current.clone()),
            Some(value) => value,
            None => {
                return match self {
                    Aggregation::Count => current.checked_add(&Value::Integer(1)),
                    _ => Ok(current.clone()),
                };
            }
        };

        match self {
            Aggregation::Sum => current.checked_add(value),
            Aggregation::Count => current.checked_add(&Value::Integer(1)),
            Aggregation::Product => current.checked_mul(value),
            Aggregation::Min => pick(current, value, Ordering::Less),
            Aggregation::Max => pick(current, value, Ordering::Greater),
            Aggregation::First => {
                if current.is_empty() {
                    Ok(value.clone())
                } else {
                    Ok(current.clone())
                }
            }
            Aggregation::Last => Ok(value.clone()),
        }
    }
}

/// Keeps `candidate` when it compares to `current` as `wanted`.
fn pick(current: &Value, candidate: &Value, wanted: Ordering) -> ScalarResult<Value> {
    if current.is_empty() || candidate.try_cmp(current)? == wanted {
        Ok(candidate.clone())
    } else {
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar::{ScalarError, ValueKind};

    fn fold(aggregation: Aggregation, values: &[Value]) -> ScalarResult<Value> {
        values
            .iter()
            .try_fold(aggregation.initial_value(), |acc, v| aggregation.step(&acc, Some(v)))
    }

    #[test]
    fn test_closure_is_aggregator() {
        let sum_first = |current: &[Value], row: &[Value]| -> ScalarResult<Vec<Value>> {
            Ok(vec![current[0].checked_add(&row[0])?])
        };

        let result = sum_first
            .aggregate(&[Value::Integer(1)], &[Value::Integer(2), Value::from("x")])
            .unwrap();
        assert_eq!(result, vec![Value::Integer(3)]);
    }

    #[test]
    fn test_sum_and_product() {
        let values = vec![Value::Integer(2), Value::Empty, Value::Float(1.5)];

        assert_eq!(fold(Aggregation::Sum, &values), Ok(Value::Float(3.5)));
        assert_eq!(fold(Aggregation::Product, &values), Ok(Value::Float(3.0)));
        assert_eq!(fold(Aggregation::Sum, &[]), Ok(Value::Integer(0)));
    }

    #[test]
    fn test_count() {
        let values = vec![Value::from("a"), Value::Empty, Value::Integer(3)];
        assert_eq!(fold(Aggregation::Count, &values), Ok(Value::Integer(2)));

        let rows = Aggregation::Count.step(&Value::Integer(4), None);
        assert_eq!(rows, Ok(Value::Integer(5)));
    }

    #[test]
    fn test_min_max() {
        let values = vec![Value::Integer(5), Value::Float(2.5), Value::Empty, Value::Integer(9)];

        assert_eq!(fold(Aggregation::Min, &values), Ok(Value::Float(2.5)));
        assert_eq!(fold(Aggregation::Max, &values), Ok(Value::Integer(9)));
        assert_eq!(fold(Aggregation::Min, &[]), Ok(Value::Empty));

        let words = vec![Value::from("Jan"), Value::from("Feb")];
        assert_eq!(fold(Aggregation::Min, &words), Ok(Value::from("Feb")));
    }

    #[test]
    fn test_first_last() {
        let values = vec![Value::Empty, Value::from("a"), Value::from("b"), Value::Empty];

        assert_eq!(fold(Aggregation::First, &values), Ok(Value::from("a")));
        assert_eq!(fold(Aggregation::Last, &values), Ok(Value::from("b")));
    }

    #[test]
    fn test_type_mismatch_propagates() {
        let values = vec![Value::Integer(1), Value::from("oops")];

        assert_eq!(
            fold(Aggregation::Sum, &values),
            Err(ScalarError::TypeMismatch {
                expected: ValueKind::Float,
                found: ValueKind::Text,
            })
        );
        assert!(fold(Aggregation::Max, &values).is_err());
    }
}
