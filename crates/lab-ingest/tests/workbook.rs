//! Integration tests for workbook reading.

use std::path::{Path, PathBuf};

use lab_ingest::{IngestError, read_workbook, sheet_names};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("resultados.xlsx");
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    let enero = workbook.add_worksheet();
    enero.set_name("ENERO").expect("sheet name");
    for (col, header) in ["NOMBRES", "SERVICIO", "RESULTADO", "FECHAVAL"]
        .into_iter()
        .enumerate()
    {
        enero.write_string(0, col as u16, header).expect("header");
    }
    enero.write_string(1, 0, "ANA").expect("cell");
    enero.write_string(1, 1, "CONSULTA EXTERNA").expect("cell");
    enero.write_number(1, 2, 95.0).expect("cell");
    let fecha = ExcelDateTime::from_ymd(2023, 2, 1).expect("date");
    enero
        .write_datetime_with_format(1, 3, &fecha, &date_format)
        .expect("cell");
    // Row 2 left blank on purpose.
    enero.write_string(3, 0, "LUIS").expect("cell");
    enero.write_string(3, 1, "URG GRAL").expect("cell");
    enero.write_number(3, 2, 1.5).expect("cell");

    let febrero = workbook.add_worksheet();
    febrero.set_name("FEBRERO").expect("sheet name");
    febrero.write_string(0, 0, "NOMBRES").expect("header");

    workbook.save(&path).expect("save workbook");
    path
}

#[test]
fn reads_every_sheet_as_text() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_fixture(dir.path());

    let sheets = read_workbook(&path).expect("read workbook");
    assert_eq!(sheets.len(), 2);

    let enero = &sheets[0];
    assert_eq!(enero.name, "ENERO");
    assert_eq!(enero.headers, vec!["NOMBRES", "SERVICIO", "RESULTADO", "FECHAVAL"]);
    assert_eq!(enero.len(), 2);
    assert_eq!(enero.rows[0], vec!["ANA", "CONSULTA EXTERNA", "95", "2023-02-01"]);
    assert_eq!(enero.rows[1], vec!["LUIS", "URG GRAL", "1.5", ""]);

    let febrero = &sheets[1];
    assert_eq!(febrero.headers, vec!["NOMBRES"]);
    assert!(febrero.is_empty());
}

#[test]
fn lists_sheet_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_fixture(dir.path());
    assert_eq!(
        sheet_names(&path).expect("sheet names"),
        vec!["ENERO".to_string(), "FEBRERO".to_string()]
    );
}

#[test]
fn missing_workbook_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let result = read_workbook(&dir.path().join("missing.xlsx"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}
