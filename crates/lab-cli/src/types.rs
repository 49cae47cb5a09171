use std::path::PathBuf;
use std::time::Duration;

use lab_cli::pipeline::ConsolidatedReport;

#[derive(Debug)]
pub struct ConsolidateResult {
    pub report: ConsolidatedReport,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub preview_rows: Option<usize>,
    pub elapsed: Duration,
}
