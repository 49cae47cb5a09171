//! Error types for sheet transformation.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reshaping sheets.
///
/// Dirty input (unknown services, unparseable dates, empty sheets) is never
/// an error; these variants only cover table construction failures.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column was built with the wrong number of rows.
    #[error("column '{column}' has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Underlying DataFrame operation failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
