//! End-to-end consolidation over in-memory sheets.

use std::collections::HashSet;

use chrono::NaiveDate;
use lab_ingest::RawSheet;
use lab_model::columns::{COL_KEY, SERVICIO_NORM, WIDE_BASE_COLUMNS};
use lab_model::{PersonEventKey, PipelineOptions, REPORT_SCHEMA, report_header};
use lab_transform::data_utils::ColumnBuffer;
use lab_transform::{consolidate_sheets, pivot, prepare, project};
use polars::prelude::DataFrame;

const HEADERS: [&str; 10] = [
    "NOMBRES",
    "APELLIDOP",
    "APELLIDOM",
    "SEXO",
    "SERVICIO",
    "FECNACIMIENTO",
    "ESTUDIO",
    "PRUEBA",
    "RESULTADO",
    "FECHAVAL",
];

fn options() -> PipelineOptions {
    PipelineOptions::new()
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 30).expect("date"))
}

fn sheet(name: &str, rows: &[[&str; 10]]) -> RawSheet {
    RawSheet::new(
        name,
        HEADERS.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    )
}

fn ana(servicio: &str, estudio: &str, prueba: &str, resultado: &str) -> [String; 10] {
    [
        "ANA", "LOPEZ", "DIAZ", "F", servicio, "15/08/1985", estudio, prueba, resultado,
        "01/02/2023",
    ]
    .map(String::from)
}

fn as_refs(row: &[String; 10]) -> [&str; 10] {
    std::array::from_fn(|idx| row[idx].as_str())
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn same_visit_rows_collapse_into_one_report_row() {
    let first = ana(
        "CONSULTA EXTERNA.",
        "QUIMICA SANGUINEA 6 ELEMENTOS",
        "Glucosa",
        "95",
    );
    let second = ana("CONSULTA EXTERNA.", "EGO", "glucosa", "90");
    let workbook = [sheet("ENERO", &[as_refs(&first), as_refs(&second)])];

    let outcome = consolidate_sheets(&workbook, &options()).expect("consolidate");
    let report = ColumnBuffer::from_frame(&outcome.report).expect("buffer");
    assert_eq!(report.height(), 1);
    assert_eq!(report.value("id_trabajador", 0), "1");
    assert_eq!(report.value("nombre", 0), "ANA LOPEZ DIAZ");
    assert_eq!(report.value("edad", 0), "38");
    assert_eq!(report.value("mayor_18", 0), "Sí");
    assert_eq!(report.value("fecha_evento", 0), "2023-02-01");
    assert_eq!(report.value("Glucosa (QS)", 0), "95");
    assert_eq!(report.value("Glucosa (EGO)", 0), "90");
}

#[test]
fn abbreviated_urgency_is_kept_and_other_services_dropped() {
    let urgency = ana("urg. gral", "QS6", "Urea", "30");
    let pediatrics = ana("Pediatría", "QS6", "Urea", "28");
    let raw = sheet("ENERO", &[as_refs(&urgency), as_refs(&pediatrics)]);

    let prepared = prepare(&raw, &options()).expect("prepare");
    let table = ColumnBuffer::from_frame(&prepared).expect("buffer");
    assert_eq!(table.height(), 1);
    assert_eq!(table.value(SERVICIO_NORM, 0), "urgencia general");
    assert_eq!(table.value(COL_KEY, 0), "QS6 – Urea");
}

#[test]
fn workbook_without_target_services_yields_header_only() {
    let other = ana("Pediatría", "QS6", "Urea", "28");
    let workbook = [
        sheet("ENERO", &[as_refs(&other)]),
        sheet("FEBRERO", &[]),
    ];

    let outcome = consolidate_sheets(&workbook, &options()).expect("consolidate");
    assert_eq!(outcome.report.height(), 0);
    assert_eq!(column_names(&outcome.report), report_header());
    assert_eq!(outcome.skipped_sheets().count(), 2);

    let none = consolidate_sheets(&[], &options()).expect("consolidate");
    assert_eq!(column_names(&none.report), report_header());
}

#[test]
fn consolidation_is_idempotent() {
    let rows = [
        ana("Consulta Externa", "QS6", "Glucosa", "95"),
        ana("Consulta Externa", "BH", "Hemoglobina", "13.1"),
        ana("Urgencias", "EGO", "pH", "6"),
    ];
    let workbook = [
        sheet("ENERO", &[as_refs(&rows[0]), as_refs(&rows[1])]),
        sheet("FEBRERO", &[as_refs(&rows[2])]),
    ];

    let first = consolidate_sheets(&workbook, &options()).expect("first run");
    let second = consolidate_sheets(&workbook, &options()).expect("second run");
    assert!(first.report.equals_missing(&second.report));
    assert_eq!(first.sheets, second.sheets);
}

#[test]
fn pivoted_rows_have_unique_keys() {
    let rows = [
        ana("Consulta Externa", "QS6", "Glucosa", "95"),
        ana("consulta ext", "QS6", "Glucosa", "96"),
        ana("Urgencias", "QS6", "Glucosa", "97"),
        ana("Consulta Externa", "QS6", "Urea", "30"),
    ];
    let raw = sheet("ENERO", &rows.each_ref().map(as_refs));

    let wide = pivot(&prepare(&raw, &options()).expect("prepare")).expect("pivot");
    let table = ColumnBuffer::from_frame(&wide).expect("buffer");
    let keys: HashSet<PersonEventKey> = (0..table.height())
        .map(|row| PersonEventKey::from_fields(|column| table.value(column, row).to_string()))
        .collect();
    assert_eq!(table.height(), 2);
    assert_eq!(keys.len(), table.height());
    assert_eq!(table.value("QS6 – Glucosa", 0), "95");
}

#[test]
fn projection_prefers_first_alias() {
    let mut wide = ColumnBuffer::with_height(1);
    wide.set("nombre", vec!["ANA".into()]).expect("nombre");
    wide.set("QS6 – Glucosa", vec!["95".into()]).expect("qs6");
    wide.set("QS4 – Glucosa", vec!["99".into()]).expect("qs4");
    wide.set("QS6 - Urea", vec!["31".into()]).expect("urea");

    let report = project(&wide.into_frame().expect("frame")).expect("project");
    let table = ColumnBuffer::from_frame(&report).expect("buffer");
    assert_eq!(table.value("Glucosa (QS)", 0), "95");
    assert_eq!(table.value("Urea (QS)", 0), "31");
}

#[test]
fn projection_keeps_declared_columns_only() {
    let mut wide = ColumnBuffer::with_height(2);
    wide.set("nombre", vec!["ANA".into(), "LUIS".into()])
        .expect("nombre");
    wide.set("Perfil Tiroideo – TSH", vec!["2.1".into(), "".into()])
        .expect("extra");

    let report = project(&wide.into_frame().expect("frame")).expect("project");
    let names = column_names(&report);
    assert_eq!(names, report_header());
    assert_eq!(
        names.len(),
        1 + WIDE_BASE_COLUMNS.len() + REPORT_SCHEMA.len()
    );
    let table = ColumnBuffer::from_frame(&report).expect("buffer");
    for declared in REPORT_SCHEMA {
        assert_eq!(table.value(declared.name, 1), "", "{}", declared.name);
    }
}

#[test]
fn report_header_snapshot() {
    insta::assert_snapshot!(report_header().join("\n"), @r"
    id_trabajador
    nombre
    sexo
    edad
    mayor_18
    fecha_nacimiento
    servicio_norm
    fecha_evento
    Glucosa (EGO)
    Glucosa (QS)
    Urea (Orina)
    Urea (QS)
    Creatinina sérica (QS)
    Tasa de filtración glomerular (QS)
    Hemoglobina (Biometría Hemática)
    Hemoglobina (Sanguínea)
    Hemoglobina glicosilada
    Proteínas (EGO)
    Nitritos (EGO)
    pH (Sanguínea)
    Hemoglobina (orina EGO)
    ");
}
