//! FILENAME: core/cube-engine/src/rollup.rs
//! Roll-Up - Summarizes a cube along a subset of its dimensions.
//!
//! Algorithm:
//! 1. Resolve each grouping dimension to its index in the source cube
//! 2. Walk source rows in order, building each row's group key
//! 3. Find the key's group (or open a new one seeded with the initial value)
//! 4. Replace the group's aggregate with `aggregator(aggregate, row_measures)`
//!
//! Groups are emitted in first-seen order; there is no sort step.

use log::debug;
use rustc_hash::FxHashMap;
use scalar::Value;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::aggregate::Aggregator;
use crate::cube::Cube;
use crate::error::{CubeError, CubeResult};
use crate::labels::to_labels;

/// A group key. Most roll-ups group on a handful of dimensions.
type GroupKey = SmallVec<[Value; 4]>;

/// How roll-up finds the group a row belongs to.
///
/// Both strategies produce the same cube; `Hashed` trades memory for
/// constant-time lookup on large inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupingStrategy {
    /// Scan the existing groups for each row.
    #[default]
    Linear,
    /// Look groups up by hashed key.
    Hashed,
}

/// Maps group keys to their slot in the output cube.
trait GroupIndex {
    fn find(&self, points: &[Vec<Value>], key: &[Value]) -> Option<usize>;
    fn insert(&mut self, key: GroupKey, slot: usize);
}

struct LinearIndex;

impl GroupIndex for LinearIndex {
    fn find(&self, points: &[Vec<Value>], key: &[Value]) -> Option<usize> {
        points.iter().position(|point| point.as_slice() == key)
    }

    fn insert(&mut self, _key: GroupKey, _slot: usize) {}
}

#[derive(Default)]
struct HashedIndex {
    slots: FxHashMap<GroupKey, usize>,
}

impl GroupIndex for HashedIndex {
    fn find(&self, _points: &[Vec<Value>], key: &[Value]) -> Option<usize> {
        self.slots.get(key).copied()
    }

    fn insert(&mut self, key: GroupKey, slot: usize) {
        self.slots.insert(key, slot);
    }
}

impl Cube {
    /// Groups rows by `dimensions` and combines their measures with `aggregator`.
    ///
    /// The result has `dimensions` as its axes (in the given order) and
    /// `fields` as its measures. Each group starts from a copy of
    /// `initial_value`, which must have one entry per field.
    pub fn roll_up<D, F, A>(
        &self,
        dimensions: &[D],
        fields: &[F],
        aggregator: A,
        initial_value: &[Value],
    ) -> CubeResult<Cube>
    where
        D: AsRef<str>,
        F: AsRef<str>,
        A: Aggregator,
    {
        self.roll_up_with(
            dimensions,
            fields,
            aggregator,
            initial_value,
            GroupingStrategy::Linear,
        )
    }

    /// `roll_up` with an explicit grouping strategy.
    pub fn roll_up_with<D, F, A>(
        &self,
        dimensions: &[D],
        fields: &[F],
        aggregator: A,
        initial_value: &[Value],
        strategy: GroupingStrategy,
    ) -> CubeResult<Cube>
    where
        D: AsRef<str>,
        F: AsRef<str>,
        A: Aggregator,
    {
        let mut rolled = Cube {
            dimensions: to_labels(dimensions),
            fields: to_labels(fields),
            ..Cube::default()
        };

        if initial_value.len() != rolled.fields.len() {
            return Err(CubeError::AggregateArity {
                expected: rolled.fields.len(),
                found: initial_value.len(),
            });
        }

        let dim_indexes = rolled
            .dimensions
            .iter()
            .map(|d| self.dimension_index(d))
            .collect::<CubeResult<Vec<usize>>>()?;

        match strategy {
            GroupingStrategy::Linear => {
                self.fill_groups(&mut rolled, &dim_indexes, &aggregator, initial_value, LinearIndex)?;
            }
            GroupingStrategy::Hashed => {
                let index = HashedIndex::default();
                self.fill_groups(&mut rolled, &dim_indexes, &aggregator, initial_value, index)?;
            }
        }

        debug!(
            "roll_up: {} rows into {} groups over {:?} ({:?})",
            self.len(),
            rolled.len(),
            rolled.dimensions,
            strategy
        );
        Ok(rolled)
    }

    fn fill_groups<A, I>(
        &self,
        rolled: &mut Cube,
        dim_indexes: &[usize],
        aggregator: &A,
        initial_value: &[Value],
        mut index: I,
    ) -> CubeResult<()>
    where
        A: Aggregator,
        I: GroupIndex,
    {
        for (row, (point, tuple)) in self.points.iter().zip(&self.data).enumerate() {
            let key = dim_indexes
                .iter()
                .map(|&i| {
                    point.get(i).cloned().ok_or(CubeError::InvalidPoint {
                        row,
                        expected: self.dimensions.len(),
                        found: point.len(),
                    })
                })
                .collect::<CubeResult<GroupKey>>()?;

            let slot = match index.find(&rolled.points, &key) {
                Some(slot) => slot,
                None => {
                    let slot = rolled.points.len();
                    rolled.points.push(key.to_vec());
                    rolled.data.push(initial_value.to_vec());
                    index.insert(key, slot);
                    slot
                }
            };

            let aggregate = aggregator.aggregate(&rolled.data[slot], tuple)?;
            if aggregate.len() != rolled.fields.len() {
                return Err(CubeError::AggregateArity {
                    expected: rolled.fields.len(),
                    found: aggregate.len(),
                });
            }
            rolled.data[slot] = aggregate;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar::{ScalarError, ScalarResult, ValueKind};

    fn create_test_cube() -> Cube {
        let mut cube = Cube::new(&["Region", "Product", "Quarter"], &["Sales"]);
        cube.add_rows(
            &["Region", "Product", "Quarter", "Sales"],
            &[
                vec![Value::from("North"), Value::from("Apples"), Value::from(1), Value::from(100)],
                vec![Value::from("North"), Value::from("Oranges"), Value::from(1), Value::from(150)],
                vec![Value::from("South"), Value::from("Apples"), Value::from(2), Value::from(200)],
                vec![Value::from("North"), Value::from("Apples"), Value::from(2), Value::from(50)],
                vec![Value::from("South"), Value::from("Oranges"), Value::from(2), Value::from(250)],
            ],
        )
        .unwrap();
        cube
    }

    fn sum(current: &[Value], row: &[Value]) -> ScalarResult<Vec<Value>> {
        Ok(vec![current[0].checked_add(&row[0])?])
    }

    fn count(current: &[Value], _row: &[Value]) -> ScalarResult<Vec<Value>> {
        Ok(vec![current[0].checked_add(&Value::Integer(1))?])
    }

    #[test]
    fn test_roll_up_single_dimension() {
        let rolled = create_test_cube()
            .roll_up(&["Region"], &["Total"], sum, &[Value::Integer(0)])
            .unwrap();

        assert_eq!(rolled.headers(), vec!["Region", "Total"]);
        assert_eq!(
            rolled.rows(),
            vec![
                vec![Value::from("North"), Value::from(300)],
                vec![Value::from("South"), Value::from(450)],
            ]
        );
        assert_eq!(rolled.is_valid(), Ok(()));
    }

    #[test]
    fn test_roll_up_reordered_dimensions() {
        let rolled = create_test_cube()
            .roll_up(&["Product", "Region"], &["Total"], sum, &[Value::Integer(0)])
            .unwrap();

        assert_eq!(rolled.dimensions, vec!["Product", "Region"]);
        assert_eq!(
            rolled.points,
            vec![
                vec![Value::from("Apples"), Value::from("North")],
                vec![Value::from("Oranges"), Value::from("North")],
                vec![Value::from("Apples"), Value::from("South")],
                vec![Value::from("Oranges"), Value::from("South")],
            ]
        );
        assert_eq!(rolled.data[0], vec![Value::from(150)]);
    }

    #[test]
    fn test_roll_up_no_dimensions_is_grand_total() {
        let no_dims: [&str; 0] = [];
        let rolled = create_test_cube()
            .roll_up(&no_dims, &["Total"], sum, &[Value::Integer(0)])
            .unwrap();

        assert_eq!(rolled.points, vec![Vec::<Value>::new()]);
        assert_eq!(rolled.data, vec![vec![Value::from(750)]]);
    }

    #[test]
    fn test_roll_up_counts_every_row() {
        let cube = create_test_cube();
        let rolled = cube
            .roll_up(&["Quarter", "Product"], &["Rows"], count, &[Value::Integer(0)])
            .unwrap();

        let total: i64 = rolled.data.iter().map(|d| d[0].as_i64().unwrap()).sum();
        assert_eq!(total, cube.len() as i64);
    }

    #[test]
    fn test_strategies_agree() {
        let cube = create_test_cube();
        for dims in [vec!["Region"], vec!["Quarter", "Region"], vec!["Product", "Quarter", "Region"]] {
            let linear = cube
                .roll_up_with(&dims, &["Total"], sum, &[Value::Integer(0)], GroupingStrategy::Linear)
                .unwrap();
            let hashed = cube
                .roll_up_with(&dims, &["Total"], sum, &[Value::Integer(0)], GroupingStrategy::Hashed)
                .unwrap();
            assert_eq!(linear, hashed);
        }
    }

    #[test]
    fn test_roll_up_unknown_dimension() {
        let result = create_test_cube().roll_up(&["Region", "Year"], &["Total"], sum, &[Value::Integer(0)]);

        assert_eq!(result, Err(CubeError::DimensionNotFound("Year".to_string())));
    }

    #[test]
    fn test_roll_up_initial_value_arity() {
        let result = create_test_cube().roll_up(&["Region"], &["Total", "Rows"], sum, &[Value::Integer(0)]);

        assert_eq!(result, Err(CubeError::AggregateArity { expected: 2, found: 1 }));
    }

    #[test]
    fn test_roll_up_aggregate_arity() {
        let widen = |current: &[Value], _row: &[Value]| -> ScalarResult<Vec<Value>> {
            let mut next = current.to_vec();
            next.push(Value::Empty);
            Ok(next)
        };
        let result = create_test_cube().roll_up(&["Region"], &["Total"], widen, &[Value::Integer(0)]);

        assert_eq!(result, Err(CubeError::AggregateArity { expected: 1, found: 2 }));
    }

    #[test]
    fn test_roll_up_aggregator_failure() {
        let result = create_test_cube().roll_up(&["Region"], &["Total"], sum, &[Value::from("zero")]);

        assert_eq!(
            result,
            Err(CubeError::Aggregation(ScalarError::TypeMismatch {
                expected: ValueKind::Float,
                found: ValueKind::Text,
            }))
        );
    }

    #[test]
    fn test_roll_up_short_point() {
        let mut cube = create_test_cube();
        cube.points[2].truncate(1);

        let result = cube.roll_up(&["Product"], &["Total"], sum, &[Value::Integer(0)]);
        assert_eq!(result, Err(CubeError::InvalidPoint { row: 2, expected: 3, found: 1 }));
    }

    #[test]
    fn test_empty_cube_rolls_up_to_empty() {
        let cube = Cube::new(&["Region"], &["Sales"]);
        let rolled = cube.roll_up(&["Region"], &["Total"], sum, &[Value::Integer(0)]).unwrap();

        assert!(rolled.is_empty());
        assert_eq!(rolled.headers(), vec!["Region", "Total"]);
    }
}
