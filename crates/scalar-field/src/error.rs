//! Error types for scalar field construction.

use thiserror::Error;

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while constructing a scalar field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The grid geometry is degenerate (zero dimensions or cell size).
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),

    /// The sample sequence does not match the declared grid dimensions.
    #[error("expected {expected} samples for the grid, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The ASCIIGrid source text failed to parse.
    #[error("ASCIIGrid parse error: {0}")]
    Asc(#[from] ascgrid_parser::AscGridError),
}
