//! Pivot engine: long-format test rows into one wide row per visit.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use polars::prelude::DataFrame;
use tracing::debug;

use lab_model::PersonEventKey;
use lab_model::columns::{COL_KEY, RESULTADO, WIDE_BASE_COLUMNS};

use crate::data_utils::{ColumnBuffer, empty_frame, first_non_empty, sort_case_insensitive};
use crate::error::Result;

/// Results of one visit, grouped by pivot column in input row order.
type VisitCells<'a> = BTreeMap<&'a str, Vec<&'a str>>;

/// Pivots a prepared sheet.
///
/// Rows sharing a Person-Event Key collapse into one row. Each distinct
/// `col_key` becomes a column whose cell is the first non-empty `resultado`
/// in input order; absent combinations are empty. Columns are the wide base
/// fields followed by the test columns sorted case-insensitively. Rows are
/// ordered by birth date, name and event date.
pub fn pivot(prepared: &DataFrame) -> Result<DataFrame> {
    let table = ColumnBuffer::from_frame(prepared)?;
    if table.height() == 0 || !has_content(&table) {
        return empty_frame(&WIDE_BASE_COLUMNS);
    }

    let mut visits: HashMap<PersonEventKey, VisitCells<'_>> = HashMap::new();
    let mut test_columns = BTreeSet::new();
    for row in 0..table.height() {
        let key = PersonEventKey::from_fields(|column| table.value(column, row).to_string());
        let cells = visits.entry(key).or_default();
        let col_key = table.value(COL_KEY, row);
        if col_key.trim().is_empty() {
            continue;
        }
        cells
            .entry(col_key)
            .or_default()
            .push(table.value(RESULTADO, row));
        test_columns.insert(col_key);
    }

    let mut visits: Vec<(PersonEventKey, VisitCells<'_>)> = visits.into_iter().collect();
    visits.sort_by(|(a, _), (b, _)| a.cmp_birth_name_event(b));

    let mut test_columns: Vec<String> = test_columns.into_iter().map(str::to_string).collect();
    sort_case_insensitive(&mut test_columns);
    debug!(
        rows = table.height(),
        visits = visits.len(),
        columns = test_columns.len(),
        "pivoted sheet"
    );

    let mut wide = ColumnBuffer::with_height(visits.len());
    for (idx, base) in WIDE_BASE_COLUMNS.iter().enumerate() {
        let values = visits
            .iter()
            .map(|(key, _)| key.values()[idx].clone())
            .collect();
        wide.set(base, values)?;
    }
    for column in &test_columns {
        let values = visits
            .iter()
            .map(|(_, cells)| {
                cells
                    .get(column.as_str())
                    .and_then(|results| first_non_empty(results.iter().copied()))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        wide.set(column, values)?;
    }
    wide.into_frame()
}

fn has_content(table: &ColumnBuffer) -> bool {
    [COL_KEY, RESULTADO].iter().any(|column| {
        table
            .get(column)
            .is_some_and(|values| values.iter().any(|value| !value.trim().is_empty()))
    })
}
