//! FILENAME: core/cube-engine/src/error.rs

use scalar::ScalarError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    #[error("invalid point at row {row}: expected {expected} coordinates, found {found}")]
    InvalidPoint {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid data tuple at row {row}: expected {expected} values, found {found}")]
    InvalidData {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("orphan rows: {points} points but {data} data tuples")]
    OrphanRows { points: usize, data: usize },

    #[error("dimension not found: {0}")]
    DimensionNotFound(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("invalid header: expected {expected} labels, found {found}")]
    HeaderArity { expected: usize, found: usize },

    #[error("invalid row {row}: expected {expected} values, found {found}")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("aggregate has {found} values, expected {expected}")]
    AggregateArity { expected: usize, found: usize },

    #[error("invalid roll-up definition: {0}")]
    InvalidDefinition(String),

    #[error("aggregation failed: {0}")]
    Aggregation(#[from] ScalarError),
}

pub type CubeResult<T> = Result<T, CubeError>;
