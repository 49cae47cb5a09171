//! Canonical column names.
//!
//! Raw sheet headers are canonicalized onto these names before any other
//! processing. Derived columns are added by the row preparer.

pub const NOMBRES: &str = "nombres";
pub const APELLIDO_PATERNO: &str = "apellido_paterno";
pub const APELLIDO_MATERNO: &str = "apellido_materno";
pub const SEXO: &str = "sexo";
pub const SERVICIO: &str = "servicio";
pub const FECHA_NACIMIENTO: &str = "fecha_nacimiento";
pub const ESTUDIO: &str = "estudio";
pub const PRUEBA: &str = "prueba";
pub const RESULTADO: &str = "resultado";
pub const FECHA_CREACION: &str = "fecha_creacion";
pub const FECHA_VALIDACION: &str = "fecha_validacion";
pub const FECHA: &str = "fecha";

// Derived by the row preparer.
pub const NOMBRE: &str = "nombre";
pub const EDAD: &str = "edad";
pub const MAYOR_18: &str = "mayor_18";
pub const SERVICIO_NORM: &str = "servicio_norm";
pub const FECHA_EVENTO: &str = "fecha_evento";
pub const STUDY_CANON: &str = "study_canon";
pub const TEST_CANON: &str = "test_canon";
pub const COL_KEY: &str = "col_key";

/// Sequential identifier prepended to the final report.
pub const ID_TRABAJADOR: &str = "id_trabajador";

/// Value of `mayor_18` for adults.
pub const ADULT_YES: &str = "Sí";
/// Value of `mayor_18` for minors and unknown ages.
pub const ADULT_NO: &str = "No";

/// Columns every prepared sheet is guaranteed to carry.
pub const BASE_COLUMNS: [&str; 12] = [
    NOMBRES,
    APELLIDO_PATERNO,
    APELLIDO_MATERNO,
    SEXO,
    SERVICIO,
    FECHA_NACIMIENTO,
    ESTUDIO,
    PRUEBA,
    RESULTADO,
    FECHA_CREACION,
    FECHA_VALIDACION,
    FECHA,
];

/// Leading columns of every wide (pivoted) table, in output order.
pub const WIDE_BASE_COLUMNS: [&str; 7] = [
    NOMBRE,
    SEXO,
    EDAD,
    MAYOR_18,
    FECHA_NACIMIENTO,
    SERVICIO_NORM,
    FECHA_EVENTO,
];

/// Returns true if `name` is one of the wide base columns.
pub fn is_wide_base_column(name: &str) -> bool {
    WIDE_BASE_COLUMNS.contains(&name)
}
