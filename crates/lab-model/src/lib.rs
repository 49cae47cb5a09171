//! Data model for laboratory report consolidation.
//!
//! This crate holds the vocabulary shared by every pipeline stage:
//!
//! - **columns**: canonical field names and the fixed header sets
//! - **key**: the Person-Event Key that identifies one clinical visit
//! - **schema**: the declared report columns and their accepted aliases
//! - **service**: the two service categories kept by the pipeline
//! - **options**: pipeline configuration (reference date for ages)

pub mod columns;
pub mod key;
pub mod options;
pub mod schema;
pub mod service;

pub use key::PersonEventKey;
pub use options::PipelineOptions;
pub use schema::{KEY_SEPARATOR, KEY_SEPARATORS, REPORT_SCHEMA, ReportColumn, report_header};
pub use service::ServiceCategory;
