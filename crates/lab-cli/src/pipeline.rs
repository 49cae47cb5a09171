//! Pipeline orchestration: read, consolidate, export.
//!
//! Interfaces that drive the consolidator (the CLI, or any other shell) go
//! through [`consolidate`] and [`export`]. Both return `anyhow` errors with
//! enough context to show the operator what failed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{Level, enabled, info, info_span, trace, warn};

use lab_ingest::read_workbook;
use lab_model::PipelineOptions;
use lab_model::columns::{FECHA_EVENTO, NOMBRE, SERVICIO_NORM};
use lab_output::{ExportOptions, export_report};
use lab_transform::data_utils::ColumnBuffer;
use lab_transform::{SheetSummary, consolidate_sheets};

use crate::logging::redact_value;

/// Consolidated report for one workbook.
#[derive(Debug, Clone)]
pub struct ConsolidatedReport {
    /// Workbook the report was built from.
    pub source: PathBuf,
    /// Report table with the fixed header.
    pub table: DataFrame,
    /// Per-sheet counts, in workbook order.
    pub sheets: Vec<SheetSummary>,
}

impl ConsolidatedReport {
    /// (rows, columns) of the report table.
    pub fn shape(&self) -> (usize, usize) {
        self.table.shape()
    }

    /// True when no visit survived the service filter.
    pub fn is_empty(&self) -> bool {
        self.table.height() == 0
    }

    /// Sheets that contributed no rows.
    pub fn skipped_sheets(&self) -> impl Iterator<Item = &SheetSummary> {
        self.sheets.iter().filter(|sheet| sheet.is_skipped())
    }
}

/// Reads every sheet of `path` and consolidates them into one report.
///
/// Dirty cells never fail the run; only an unreadable workbook or a table
/// construction failure does.
pub fn consolidate(path: &Path, options: &PipelineOptions) -> Result<ConsolidatedReport> {
    let span = info_span!("consolidate", input = %path.display());
    let _guard = span.enter();

    let sheets =
        read_workbook(path).with_context(|| format!("read workbook {}", path.display()))?;
    info!(
        sheets = sheets.len(),
        reference_date = %options.reference_date,
        "workbook loaded"
    );

    let outcome = consolidate_sheets(&sheets, options).context("consolidate sheets")?;
    if outcome.report.height() == 0 {
        warn!("no rows matched the retained services");
    }
    if enabled!(Level::TRACE) {
        trace_rows(&outcome.report);
    }

    Ok(ConsolidatedReport {
        source: path.to_path_buf(),
        table: outcome.report,
        sheets: outcome.sheets,
    })
}

/// Writes the report and returns the path actually written.
pub fn export(report: &ConsolidatedReport, target: &Path, options: &ExportOptions) -> Result<PathBuf> {
    export_report(&report.table, target, options)
        .with_context(|| format!("export report to {}", target.display()))
}

fn trace_rows(report: &DataFrame) {
    let Ok(table) = ColumnBuffer::from_frame(report) else {
        return;
    };
    for row in 0..table.height() {
        trace!(
            row,
            nombre = redact_value(table.value(NOMBRE, row)),
            servicio = table.value(SERVICIO_NORM, row),
            fecha_evento = redact_value(table.value(FECHA_EVENTO, row)),
            "report row"
        );
    }
}
