//! FILENAME: core/cube-engine/src/lib.rs
//! OLAP cube subsystem.
//!
//! This crate provides an in-memory multidimensional cube and its algebra.
//! It depends on `scalar` only for the shared `Value` type.
//!
//! Layers:
//! - `cube`: The data model, validation, projection and ingestion (what the cube IS)
//! - `slice`: Slice and Dice row filters
//! - `rollup`: Grouping and aggregation (HOW we summarize)
//! - `aggregate`: The aggregator contract and built-in reductions
//! - `definition`: Serializable roll-up configuration
//!
//! Every transformation returns a new cube; only `Cube::add_rows` mutates.

pub mod aggregate;
pub mod cube;
pub mod definition;
pub mod error;
pub mod labels;
pub mod rollup;
pub mod slice;

pub use aggregate::{Aggregation, Aggregator};
pub use cube::{Cube, DataTuple, Point};
pub use definition::{MeasureAggregator, MeasureDefinition, RollUpDefinition};
pub use error::{CubeError, CubeResult};
pub use rollup::GroupingStrategy;
pub use scalar::{ScalarError, ScalarResult, Value, ValueKind};
