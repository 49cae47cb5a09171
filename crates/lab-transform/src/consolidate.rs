//! Multi-sheet consolidation.
//!
//! Every sheet is prepared and pivoted on its own. The wide tables are then
//! unioned by column name and re-grouped by Person-Event Key, so a visit
//! split across monthly sheets ends up as one report row.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use lab_ingest::RawSheet;
use lab_model::columns::{WIDE_BASE_COLUMNS, is_wide_base_column};
use lab_model::{PersonEventKey, PipelineOptions};

use crate::data_utils::{
    ColumnBuffer, cell, empty_frame, first_non_empty, sort_case_insensitive,
};
use crate::error::Result;
use crate::pivot::pivot;
use crate::prepare::prepare;
use crate::project::project;

/// Per-sheet counts collected during consolidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    /// Data rows read from the sheet.
    pub raw_rows: usize,
    /// Rows left after the service filter.
    pub kept_rows: usize,
    /// Visit rows produced by the pivot.
    pub visits: usize,
}

impl SheetSummary {
    /// True when the sheet contributed nothing to the report.
    pub fn is_skipped(&self) -> bool {
        self.visits == 0
    }
}

/// Result of consolidating a workbook.
#[derive(Debug, Clone)]
pub struct ConsolidationOutcome {
    /// Final report table, projected onto the declared schema.
    pub report: DataFrame,
    /// One entry per input sheet, in workbook order.
    pub sheets: Vec<SheetSummary>,
}

impl ConsolidationOutcome {
    /// Sheets that produced no visit rows.
    pub fn skipped_sheets(&self) -> impl Iterator<Item = &SheetSummary> {
        self.sheets.iter().filter(|sheet| sheet.is_skipped())
    }
}

/// Consolidates all sheets of a workbook into the final report.
///
/// Sheets whose pivot is empty are skipped. When no sheet yields rows the
/// report is the fixed header with zero rows.
pub fn consolidate_sheets(
    sheets: &[RawSheet],
    options: &PipelineOptions,
) -> Result<ConsolidationOutcome> {
    let mut tables = Vec::with_capacity(sheets.len());
    let mut summaries = Vec::with_capacity(sheets.len());

    for sheet in sheets {
        let span = info_span!("sheet", sheet = %sheet.name);
        let _guard = span.enter();

        let prepared = prepare(sheet, options)?;
        let wide = pivot(&prepared)?;
        let summary = SheetSummary {
            name: sheet.name.clone(),
            raw_rows: sheet.len(),
            kept_rows: prepared.height(),
            visits: wide.height(),
        };
        if summary.is_skipped() {
            info!(rows = summary.raw_rows, "sheet has no target rows, skipping");
        } else {
            info!(
                rows = summary.raw_rows,
                kept = summary.kept_rows,
                visits = summary.visits,
                "sheet pivoted"
            );
            tables.push(wide);
        }
        summaries.push(summary);
    }

    let merged = merge_wide_tables(&tables)?;
    let report = project(&merged)?;
    info!(
        sheets = sheets.len(),
        contributing = tables.len(),
        rows = report.height(),
        "workbook consolidated"
    );
    Ok(ConsolidationOutcome {
        report,
        sheets: summaries,
    })
}

/// Unions wide tables and collapses rows sharing a Person-Event Key.
///
/// Missing cells count as empty. Each column is resolved by first non-empty
/// value in table-then-row order. Rows are ordered by the key fields in wide
/// base column order; test columns follow the base columns, sorted
/// case-insensitively.
pub fn merge_wide_tables(tables: &[DataFrame]) -> Result<DataFrame> {
    let buffers = tables
        .iter()
        .map(ColumnBuffer::from_frame)
        .collect::<Result<Vec<_>>>()?;

    let mut test_columns: Vec<String> = buffers
        .iter()
        .flat_map(ColumnBuffer::names)
        .filter(|name| !is_wide_base_column(name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    sort_case_insensitive(&mut test_columns);

    let mut groups: BTreeMap<PersonEventKey, Vec<(usize, usize)>> = BTreeMap::new();
    for (table, buffer) in buffers.iter().enumerate() {
        for row in 0..buffer.height() {
            let key = PersonEventKey::from_fields(|column| buffer.value(column, row).to_string());
            groups.entry(key).or_default().push((table, row));
        }
    }
    if groups.is_empty() {
        return empty_frame(&WIDE_BASE_COLUMNS);
    }

    let mut merged = ColumnBuffer::with_height(groups.len());
    for (idx, base) in WIDE_BASE_COLUMNS.iter().enumerate() {
        let values = groups.keys().map(|key| key.values()[idx].clone()).collect();
        merged.set(base, values)?;
    }
    for column in &test_columns {
        let sources: Vec<Option<&[String]>> =
            buffers.iter().map(|buffer| buffer.get(column)).collect();
        let values = groups
            .values()
            .map(|rows| {
                first_non_empty(rows.iter().map(|(table, row)| cell(sources[*table], *row)))
                .unwrap_or_default()
                .to_string()
            })
            .collect();
        merged.set(column, values)?;
    }
    merged.into_frame()
}
