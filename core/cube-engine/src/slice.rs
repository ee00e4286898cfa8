//! FILENAME: core/cube-engine/src/slice.rs
//! Slice and Dice - Row filters over a cube.
//!
//! - `slice` fixes one dimension to a value and drops that axis.
//! - `dice` keeps the rows whose point satisfies a predicate; the schema is
//!   unchanged.
//!
//! Both are stable filters and never touch the source cube.

use log::debug;
use scalar::Value;

use crate::cube::Cube;
use crate::error::CubeResult;
use crate::labels::remove_at;

impl Cube {
    /// Picks the sub-cube where `dimension` equals `value`, removing that dimension.
    ///
    /// Matching is exact scalar equality: `Integer(2018)` does not match
    /// `Float(2018.0)`. No match yields an empty, valid cube.
    pub fn slice(&self, dimension: &str, value: &Value) -> CubeResult<Cube> {
        let dim_index = self.dimension_index(dimension)?;

        let mut sliced = Cube {
            dimensions: remove_at(&self.dimensions, dim_index),
            fields: self.fields.clone(),
            ..Cube::default()
        };

        for (point, tuple) in self.points.iter().zip(&self.data) {
            if point.get(dim_index) == Some(value) {
                sliced.points.push(remove_at(point, dim_index));
                sliced.data.push(tuple.clone());
            }
        }

        debug!(
            "slice: {} = {} kept {} of {} rows",
            dimension,
            value,
            sliced.len(),
            self.len()
        );
        Ok(sliced)
    }

    /// Picks the sub-cube of rows whose point satisfies `predicate`.
    pub fn dice<P>(&self, predicate: P) -> Cube
    where
        P: Fn(&[Value]) -> bool,
    {
        let mut diced = Cube {
            dimensions: self.dimensions.clone(),
            fields: self.fields.clone(),
            ..Cube::default()
        };

        for (point, tuple) in self.points.iter().zip(&self.data) {
            if predicate(point.as_slice()) {
                diced.points.push(point.clone());
                diced.data.push(tuple.clone());
            }
        }

        debug!("dice: kept {} of {} rows", diced.len(), self.len());
        diced
    }
}
