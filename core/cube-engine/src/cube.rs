//! FILENAME: core/cube-engine/src/cube.rs
//! Cube - The data model and its row-oriented projection.
//!
//! A cube holds two row-aligned collections:
//! - `points`: one coordinate tuple per row, ordered like `dimensions`
//! - `data`: one measure tuple per row, ordered like `fields`
//!
//! Structural consistency is checked on demand with `is_valid`. Every
//! transformation in this crate emits a valid cube from a valid input.

use log::{debug, trace};
use scalar::Value;
use serde::{Deserialize, Serialize};

use crate::error::{CubeError, CubeResult};
use crate::labels::{dimension_index, field_index, index_of, to_labels};

/// Coordinate tuple of one row.
pub type Point = Vec<Value>;

/// Measure tuple of one row.
pub type DataTuple = Vec<Value>;

/// An in-memory OLAP cube.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Dimension names, defining the coordinate axes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,

    /// Coordinate tuples, index-aligned with `data`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,

    /// Measure names, defining the value axes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Measure tuples, index-aligned with `points`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataTuple>,
}

impl Cube {
    /// Creates an empty cube with the given schema.
    pub fn new<D, F>(dimensions: &[D], fields: &[F]) -> Self
    where
        D: AsRef<str>,
        F: AsRef<str>,
    {
        Cube {
            dimensions: to_labels(dimensions),
            points: Vec::new(),
            fields: to_labels(fields),
            data: Vec::new(),
        }
    }

    /// Assembles a cube from already-aligned parts. No validation is done.
    pub fn from_parts(
        dimensions: Vec<String>,
        fields: Vec<String>,
        points: Vec<Point>,
        data: Vec<DataTuple>,
    ) -> Self {
        Cube {
            dimensions,
            points,
            fields,
            data,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Checks that points and data are aligned with the schema.
    ///
    /// A cube without data is always accepted. Otherwise the first failing
    /// check is reported: point arity, then data arity, then row count.
    pub fn is_valid(&self) -> CubeResult<()> {
        if self.data.is_empty() {
            return Ok(());
        }

        for (row, point) in self.points.iter().enumerate() {
            if point.len() != self.dimensions.len() {
                return Err(CubeError::InvalidPoint {
                    row,
                    expected: self.dimensions.len(),
                    found: point.len(),
                });
            }
        }

        for (row, tuple) in self.data.iter().enumerate() {
            if tuple.len() != self.fields.len() {
                return Err(CubeError::InvalidData {
                    row,
                    expected: self.fields.len(),
                    found: tuple.len(),
                });
            }
        }

        if self.points.len() != self.data.len() {
            return Err(CubeError::OrphanRows {
                points: self.points.len(),
                data: self.data.len(),
            });
        }

        Ok(())
    }

    // ========================================================================
    // PROJECTION
    // ========================================================================

    /// Column names for `rows`: dimensions first, then fields.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.dimensions.len() + self.fields.len());
        headers.extend_from_slice(&self.dimensions);
        headers.extend_from_slice(&self.fields);
        headers
    }

    /// The cube content as owned rows, each `point ++ data`.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        let width = self.dimensions.len() + self.fields.len();
        self.points
            .iter()
            .zip(&self.data)
            .map(|(point, tuple)| {
                let mut row = Vec::with_capacity(width);
                row.extend_from_slice(point);
                row.extend_from_slice(tuple);
                row
            })
            .collect()
    }

    // ========================================================================
    // INGESTION
    // ========================================================================

    /// Appends tabular rows whose columns are labelled by `header`.
    ///
    /// The header may list labels in any order; each dimension and field is
    /// matched to the first header entry with the same name. All checks run
    /// before anything is appended, so a failed call leaves the cube intact.
    pub fn add_rows<H, R>(&mut self, header: &[H], rows: &[R]) -> CubeResult<()>
    where
        H: AsRef<str>,
        R: AsRef<[Value]>,
    {
        let expected = self.dimensions.len() + self.fields.len();
        if header.len() != expected {
            return Err(CubeError::HeaderArity {
                expected,
                found: header.len(),
            });
        }

        let header: Vec<String> = to_labels(header);

        let dim_indexes = self
            .dimensions
            .iter()
            .map(|d| {
                index_of(d, &header)
                    .ok_or_else(|| CubeError::DimensionNotFound(d.clone()))
            })
            .collect::<CubeResult<Vec<usize>>>()?;

        let fld_indexes = self
            .fields
            .iter()
            .map(|f| {
                index_of(f, &header)
                    .ok_or_else(|| CubeError::FieldNotFound(f.clone()))
            })
            .collect::<CubeResult<Vec<usize>>>()?;

        for (row, values) in rows.iter().enumerate() {
            let found = values.as_ref().len();
            if found != header.len() {
                return Err(CubeError::RowArity {
                    row,
                    expected: header.len(),
                    found,
                });
            }
        }

        trace!("add_rows: dimension columns {:?}, field columns {:?}", dim_indexes, fld_indexes);

        self.points.reserve(rows.len());
        self.data.reserve(rows.len());
        for values in rows {
            let values = values.as_ref();
            self.points
                .push(dim_indexes.iter().map(|&i| values[i].clone()).collect());
            self.data
                .push(fld_indexes.iter().map(|&i| values[i].clone()).collect());
        }

        debug!("add_rows: appended {} rows, cube now has {}", rows.len(), self.len());
        Ok(())
    }

    // ========================================================================
    // LABEL LOOKUP
    // ========================================================================

    /// Position of a dimension by name.
    pub fn dimension_index(&self, name: &str) -> CubeResult<usize> {
        dimension_index(name, &self.dimensions)
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: &str) -> CubeResult<usize> {
        field_index(name, &self.fields)
    }
}
