//! Integration tests for the model crate.

use lab_model::columns::WIDE_BASE_COLUMNS;
use lab_model::{PersonEventKey, REPORT_SCHEMA, ServiceCategory, report_header};

#[test]
fn report_header_starts_with_identifier_and_visit_fields() {
    let header = report_header();
    assert_eq!(header[0], "id_trabajador");
    assert_eq!(&header[1..8], &WIDE_BASE_COLUMNS[..]);
}

#[test]
fn every_declared_column_has_aliases() {
    for column in REPORT_SCHEMA {
        assert!(!column.aliases.is_empty(), "{} has no aliases", column.name);
        assert_eq!(column.alias_keys().len(), column.aliases.len() * 2);
    }
}

#[test]
fn key_round_trips_through_values() {
    let key = PersonEventKey {
        nombre: "JUAN PEREZ LOPEZ".to_string(),
        sexo: "M".to_string(),
        edad: Some(52),
        mayor_18: "Sí".to_string(),
        fecha_nacimiento: "1971-03-04".to_string(),
        servicio_norm: ServiceCategory::UrgenciaGeneral.to_string(),
        fecha_evento: "2023-02-01".to_string(),
    };
    let values = key.values();
    let rebuilt = PersonEventKey::from_fields(|column| {
        let idx = WIDE_BASE_COLUMNS
            .iter()
            .position(|name| *name == column)
            .expect("key column");
        values[idx].clone()
    });
    assert_eq!(rebuilt, key);
}
