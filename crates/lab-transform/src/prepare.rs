//! Row preparation: one raw sheet into normalized long-format rows.
//!
//! Each output row is one test result of one visit, carrying the derived
//! Person-Event Key fields and the `col_key` that names its pivot column.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use lab_ingest::RawSheet;
use lab_model::columns::{
    ADULT_NO, ADULT_YES, APELLIDO_MATERNO, APELLIDO_PATERNO, BASE_COLUMNS, COL_KEY, EDAD, ESTUDIO,
    FECHA, FECHA_CREACION, FECHA_EVENTO, FECHA_NACIMIENTO, FECHA_VALIDACION, MAYOR_18, NOMBRE,
    NOMBRES, PRUEBA, SERVICIO, SERVICIO_NORM, SEXO, STUDY_CANON, TEST_CANON, WIDE_BASE_COLUMNS,
};
use lab_model::{KEY_SEPARATOR, PipelineOptions, ServiceCategory};

use crate::data_utils::{ColumnBuffer, empty_frame, first_non_empty};
use crate::datetime::{age_from_iso, to_iso_date};
use crate::error::Result;
use crate::text::collapse_whitespace;
use crate::vocabulary::{canon_header, canon_study, canon_test, normalize_servicio};

/// Prepares one sheet.
///
/// Rows outside the two retained service categories are dropped. When no row
/// survives, the result is a zero-row frame with only the wide base header.
pub fn prepare(sheet: &RawSheet, options: &PipelineOptions) -> Result<DataFrame> {
    let _span = info_span!("prepare", sheet = %sheet.name).entered();

    let mut table = canonical_table(sheet)?;
    for column in BASE_COLUMNS {
        table.ensure(column);
    }

    let servicio_norm: Vec<String> = column(&table, SERVICIO)
        .iter()
        .map(|raw| normalize_servicio(raw))
        .collect();
    let keep: Vec<bool> = servicio_norm
        .iter()
        .map(|value| ServiceCategory::parse(value).is_some())
        .collect();
    table.set(SERVICIO_NORM, servicio_norm)?;
    table.retain_rows(&keep);
    debug!(
        rows = sheet.len(),
        kept = table.height(),
        "filtered rows by service"
    );
    if table.height() == 0 {
        return empty_frame(&WIDE_BASE_COLUMNS);
    }

    let nombre = build_names(&table);
    table.set(NOMBRE, nombre)?;

    let sexo = column(&table, SEXO)
        .iter()
        .map(|value| value.trim().to_string())
        .collect();
    table.set(SEXO, sexo)?;

    let nacimiento = iso_column(&table, FECHA_NACIMIENTO);
    let ages: Vec<Option<i32>> = nacimiento
        .iter()
        .map(|iso| age_from_iso(iso, options.reference_date))
        .collect();
    let edad = ages
        .iter()
        .map(|age| age.map(|years| years.to_string()).unwrap_or_default())
        .collect();
    let mayor_18 = ages
        .iter()
        .map(|age| match age {
            Some(years) if *years >= 18 => ADULT_YES.to_string(),
            _ => ADULT_NO.to_string(),
        })
        .collect();
    table.set(FECHA_NACIMIENTO, nacimiento)?;
    table.set(EDAD, edad)?;
    table.set(MAYOR_18, mayor_18)?;

    for date_column in [FECHA_VALIDACION, FECHA_CREACION, FECHA] {
        let iso = iso_column(&table, date_column);
        table.set(date_column, iso)?;
    }
    let fecha_evento = (0..table.height())
        .map(|row| {
            first_non_empty([
                table.value(FECHA_VALIDACION, row),
                table.value(FECHA_CREACION, row),
                table.value(FECHA, row),
            ])
            .unwrap_or_default()
            .to_string()
        })
        .collect();
    table.set(FECHA_EVENTO, fecha_evento)?;

    let study: Vec<String> = column(&table, ESTUDIO)
        .iter()
        .map(|raw| canon_study(raw))
        .collect();
    let test: Vec<String> = column(&table, PRUEBA)
        .iter()
        .map(|raw| canon_test(raw))
        .collect();
    let col_key = study
        .iter()
        .zip(&test)
        .map(|(study, test)| column_key(study, test))
        .collect();
    table.set(STUDY_CANON, study)?;
    table.set(TEST_CANON, test)?;
    table.set(COL_KEY, col_key)?;

    table.into_frame()
}

/// Pivot column name for a study/test pair.
///
/// The test portion is omitted when the test is empty.
pub fn column_key(study: &str, test: &str) -> String {
    let study = study.trim();
    let test = test.trim();
    if test.is_empty() {
        study.to_string()
    } else {
        format!("{study}{KEY_SEPARATOR}{test}")
    }
}

/// Full name from first name and both surnames, single-spaced.
pub fn full_name(nombres: &str, paterno: &str, materno: &str) -> String {
    collapse_whitespace(&format!("{nombres} {paterno} {materno}"))
}

fn canonical_table(sheet: &RawSheet) -> Result<ColumnBuffer> {
    let mut table = ColumnBuffer::with_height(sheet.len());
    let mut seen = HashSet::new();
    for (idx, header) in sheet.headers.iter().enumerate() {
        let canonical = canon_header(header);
        if !seen.insert(canonical.clone()) {
            debug!(header = %header, canonical = %canonical, "dropping duplicate header");
            continue;
        }
        let values = sheet
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        table.set(&canonical, values)?;
    }
    Ok(table)
}

fn column<'a>(table: &'a ColumnBuffer, name: &str) -> &'a [String] {
    table.get(name).unwrap_or_default()
}

fn iso_column(table: &ColumnBuffer, name: &str) -> Vec<String> {
    column(table, name).iter().map(|raw| to_iso_date(raw)).collect()
}

fn build_names(table: &ColumnBuffer) -> Vec<String> {
    (0..table.height())
        .map(|row| {
            full_name(
                table.value(NOMBRES, row),
                table.value(APELLIDO_PATERNO, row),
                table.value(APELLIDO_MATERNO, row),
            )
        })
        .collect()
}
