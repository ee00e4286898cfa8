//! FILENAME: core/scalar/src/lib.rs
//! PURPOSE: Main library entry point for the scalar value model.
//! CONTEXT: Re-exports the `Value` type shared by every cube coordinate and
//! measure, together with its error type.

mod arith;
pub mod error;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::{ScalarError, ScalarResult};
pub use value::{Value, ValueKind};
