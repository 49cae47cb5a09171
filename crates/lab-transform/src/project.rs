//! Column projection onto the declared report schema.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use lab_model::columns::{EDAD, ID_TRABAJADOR, WIDE_BASE_COLUMNS};
use lab_model::{REPORT_SCHEMA, report_header};

use crate::data_utils::{ColumnBuffer, cell, first_non_empty};
use crate::error::Result;

/// Projects a consolidated wide table onto the report schema.
///
/// Each declared column takes the first alias key with a non-empty value in
/// the row. A 1-based `id_trabajador` is prepended. `id_trabajador` and
/// `edad` are integer columns (`edad` null when unknown); every other column
/// is text.
pub fn project(wide: &DataFrame) -> Result<DataFrame> {
    let table = ColumnBuffer::from_frame(wide)?;
    let height = table.height();
    if height == 0 {
        return empty_report_frame();
    }

    let mut columns: Vec<Column> = Vec::with_capacity(report_header().len());
    let ids: Vec<i64> = (1..=height as i64).collect();
    columns.push(Series::new(ID_TRABAJADOR.into(), ids).into());

    for base in WIDE_BASE_COLUMNS {
        let source = table.get(base);
        if base == EDAD {
            let ages: Vec<Option<i64>> = (0..height)
                .map(|row| cell(source, row).trim().parse::<i64>().ok())
                .collect();
            columns.push(Series::new(EDAD.into(), ages).into());
        } else {
            let values: Vec<String> = (0..height)
                .map(|row| cell(source, row).to_string())
                .collect();
            columns.push(Series::new(base.into(), values).into());
        }
    }

    for declared in REPORT_SCHEMA {
        let aliases: Vec<&[String]> = declared
            .alias_keys()
            .iter()
            .filter_map(|key| table.get(key))
            .collect();
        let values: Vec<String> = (0..height)
            .map(|row| {
                first_non_empty(aliases.iter().map(|&values| cell(Some(values), row)))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        columns.push(Series::new(declared.name.into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}

/// Zero-row report with the fixed header and report column types.
pub fn empty_report_frame() -> Result<DataFrame> {
    let columns: Vec<Column> = report_header()
        .into_iter()
        .map(|name| {
            if name == ID_TRABAJADOR || name == EDAD {
                Series::new(name.into(), Vec::<Option<i64>>::new()).into()
            } else {
                Series::new(name.into(), Vec::<String>::new()).into()
            }
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}
