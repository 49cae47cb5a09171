//! Laboratory sheet transformation.
//!
//! This crate turns raw sheets into the consolidated per-visit report:
//!
//! - **text**: accent folding and header slugs
//! - **vocabulary**: study, test, header and service canonicalization
//! - **datetime**: flexible date parsing and age computation
//! - **prepare**: one raw sheet into normalized long-format rows
//! - **pivot**: long-format rows into one wide row per visit
//! - **consolidate**: per-sheet pivots merged across the workbook
//! - **project**: wide rows onto the declared report schema
//! - **data_utils**: column buffers and the first-non-empty rule

pub mod consolidate;
pub mod data_utils;
pub mod datetime;
mod error;
pub mod pivot;
pub mod prepare;
pub mod project;
pub mod text;
pub mod vocabulary;

pub use consolidate::{ConsolidationOutcome, SheetSummary, consolidate_sheets, merge_wide_tables};
pub use data_utils::first_non_empty;
pub use error::{Result, TransformError};
pub use pivot::pivot;
pub use prepare::prepare;
pub use project::{empty_report_frame, project};
pub use vocabulary::{canon_header, canon_study, canon_test, classify_servicio, normalize_servicio};
