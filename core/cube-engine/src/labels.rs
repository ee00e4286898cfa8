//! FILENAME: core/cube-engine/src/labels.rs
//! PURPOSE: Small helpers over label arrays and tuples shared by all transformations.

use crate::error::{CubeError, CubeResult};

/// Returns a copy of `items` with the entry at `index` removed.
/// Order of the remaining entries is preserved.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len().saturating_sub(1));
    out.extend_from_slice(&items[..index.min(items.len())]);
    if index < items.len() {
        out.extend_from_slice(&items[index + 1..]);
    }
    out
}

/// Position of the first label equal to `name`.
pub fn index_of<S: AsRef<str>>(name: &str, labels: &[S]) -> Option<usize> {
    labels.iter().position(|label| label.as_ref() == name)
}

pub(crate) fn dimension_index(name: &str, dimensions: &[String]) -> CubeResult<usize> {
    index_of(name, dimensions).ok_or_else(|| CubeError::DimensionNotFound(name.to_string()))
}

pub(crate) fn field_index(name: &str, fields: &[String]) -> CubeResult<usize> {
    index_of(name, fields).ok_or_else(|| CubeError::FieldNotFound(name.to_string()))
}

pub(crate) fn to_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels.iter().map(|label| label.as_ref().to_string()).collect()
}
