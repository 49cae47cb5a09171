//! Error types for report export.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors that can occur while writing a report.
///
/// A failed export leaves the in-memory report untouched, so the caller may
/// retry with another target.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory or file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report does not fit in a worksheet.
    #[error("report too large for a worksheet ({rows} rows, {columns} columns)")]
    SheetLimit { rows: usize, columns: usize },

    /// Workbook serialization failed.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    /// DataFrame access or CSV serialization failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
