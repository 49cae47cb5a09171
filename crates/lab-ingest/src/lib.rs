//! Laboratory workbook ingestion.
//!
//! This crate opens spreadsheet exports (xlsx, xlsm, xls, xlsb, ods) and
//! returns every sheet as a [`RawSheet`]: the header row plus data rows, with
//! every cell rendered as text.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lab_ingest::read_workbook;
//!
//! let sheets = read_workbook(Path::new("resultados.xlsx"))?;
//! for sheet in &sheets {
//!     println!("{}: {} rows", sheet.name, sheet.len());
//! }
//! ```

mod error;
mod sheet;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sheet Types ===
pub use sheet::RawSheet;

// === Workbook Reading ===
pub use workbook::{
    MAX_WORKBOOK_FILE_SIZE, cell_to_string, check_file_size, check_file_size_with_limit,
    format_numeric, read_workbook, sheet_names,
};
