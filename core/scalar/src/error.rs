//! FILENAME: core/scalar/src/error.rs

use thiserror::Error;

use crate::value::{Value, ValueKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },
}

impl ScalarError {
    pub fn mismatch(expected: ValueKind, found: &Value) -> Self {
        ScalarError::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}

pub type ScalarResult<T> = Result<T, ScalarError>;
