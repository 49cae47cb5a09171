//! Clinical vocabulary canonicalization.
//!
//! Static lookup tables map the free-text study, test, header and service
//! labels found in laboratory exports onto canonical forms. All functions are
//! total: a label that is not in a table falls back to a normalized form of
//! the input instead of failing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::RegexSet;

use lab_model::ServiceCategory;
use lab_model::columns::{
    APELLIDO_MATERNO, APELLIDO_PATERNO, ESTUDIO, FECHA, FECHA_CREACION, FECHA_NACIMIENTO,
    FECHA_VALIDACION, NOMBRES, PRUEBA, RESULTADO, SERVICIO, SEXO,
};

use crate::text::{collapse_whitespace, fold, slug};

/// Study names (folded, uppercase) to their short codes.
static STUDY_SHORT: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("QUIMICA SANGUINEA 6 ELEMENTOS", "QS6"),
        ("QUIMICA SANGUINEA 3 ELEMENTOS", "QS3"),
        ("QUIMICA SANGUINEA 5 ELEMENTOS", "QS5"),
        ("QUIMICA SANGUINEA 4", "QS4"),
        ("QUIMICA SANGUINEA 6", "QS6"),
        ("BIOQUIMICA SANGUINEA 6 ELEMENTOS", "QS6"),
        ("GLUCOSA", "GLU"),
        ("UREA", "UREA"),
        ("CREATININA", "CREATININA"),
        ("ACIDO URICO", "ACH"),
        ("COLESTEROL", "COL"),
        ("TRIGLICERIDOS", "TRIG"),
        ("TASA DE FILTRACION GLOMERULAR", "TFG"),
        ("EXAMEN GENERAL DE ORINA", "EGO"),
        ("EXAMEN GENERAL DE ORINA (EGO)", "EGO"),
        ("ORINA EXAMEN GENERAL", "EGO"),
        ("BIOMETRIA HEMATICA", "BH"),
        ("BIOMETRIA HEMATICA B4", "BH"),
        ("HEMOGLOBINA GLICOSILADA", "HbA1c"),
        ("PERFIL DE LIPIDOS", "PL"),
    ])
});

/// Test names (folded, lowercase) to their accented canonical forms.
static TEST_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("glucosa", "Glucosa"),
        ("creatinina", "Creatinina"),
        ("creatinina serica", "Creatinina"),
        ("urea", "Urea"),
        ("bun", "BUN"),
        ("acido urico", "Ácido Úrico"),
        ("colesterol", "Colesterol"),
        ("trigliceridos", "Triglicéridos"),
        ("hemoglobina", "Hemoglobina"),
        ("hemoglobina glicosilada", "Hemoglobina Glicosilada"),
        ("tasa de filtracion glomerular", "Tasa de Filtración Glomerular"),
        ("tfg", "Tasa de Filtración Glomerular"),
        ("ph", "pH"),
        ("proteinas", "Proteínas"),
        ("proteina", "Proteínas"),
        ("proteinas totales", "Proteínas"),
        ("nitrito", "Nitrito"),
        ("nitritos", "Nitrito"),
    ])
});

/// Header slugs to canonical field names.
static HEADER_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("nombres", NOMBRES),
        ("nombre", NOMBRES),
        ("apellidop", APELLIDO_PATERNO),
        ("apellido_p", APELLIDO_PATERNO),
        ("apellido_paterno", APELLIDO_PATERNO),
        ("paterno", APELLIDO_PATERNO),
        ("apellidom", APELLIDO_MATERNO),
        ("apellido_m", APELLIDO_MATERNO),
        ("apellido_materno", APELLIDO_MATERNO),
        ("materno", APELLIDO_MATERNO),
        ("sexo", SEXO),
        ("genero", SEXO),
        ("servicio", SERVICIO),
        ("fecnacimiento", FECHA_NACIMIENTO),
        ("fecnacimien", FECHA_NACIMIENTO),
        ("fec_nacimiento", FECHA_NACIMIENTO),
        ("fecha_nac", FECHA_NACIMIENTO),
        ("fecha_nacimiento", FECHA_NACIMIENTO),
        ("fecha_de_nacimiento", FECHA_NACIMIENTO),
        ("estudio", ESTUDIO),
        ("prueba", PRUEBA),
        ("resultado", RESULTADO),
        ("rangoinferior", "rango_inferior"),
        ("rangosuperior", "rango_superior"),
        ("rangoalterno", "rango_alternativo"),
        ("rangoaltern", "rango_alternativo"),
        ("ide", "ide"),
        ("nss", "nss"),
        ("codigo", "codigo"),
        ("loinc", "loinc"),
        ("p_loinc", "p_loinc"),
        ("fechacrea", FECHA_CREACION),
        ("fecha_creacion", FECHA_CREACION),
        ("fechaval", FECHA_VALIDACION),
        ("fecha_validacion", FECHA_VALIDACION),
        ("usrval", "usuario_validador"),
        ("fecha", FECHA),
    ])
});

/// Ordered substring corrections for common service typos.
const SERVICE_TYPOS: [(&str, &str); 4] = [
    ("urgenciasl", "urgencias"),
    ("urgenc", "urgencia"),
    ("genral", "general"),
    ("grl", "gral"),
];

static CONSULTA_EXTERNA_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"\bconsulta\s*externa\b",
        r"\bconsulta\s*ext(erna)?\b",
        r"\bcons?(\s*)ext(\s*erna)?\b",
        r"\bc(\s*)externa\b",
    ])
    .expect("Invalid consulta externa regex")
});

static URGENCY_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"\burgencia(s)?\b", r"\burg\b", r"\burgs\b", r"\burg\w*\b"])
        .expect("Invalid urgency regex")
});

static GENERAL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"\bgeneral\b", r"\bgral\b"]).expect("Invalid general regex")
});

/// Canonical short code for a study name.
///
/// Unknown studies keep their trimmed original spelling.
pub fn canon_study(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let key = fold(raw).to_uppercase();
    match STUDY_SHORT.get(key.as_str()) {
        Some(short) => (*short).to_string(),
        None => raw.trim().to_string(),
    }
}

/// Canonical (accented, proper-case) form of a test name.
///
/// Unknown tests keep their trimmed original spelling.
pub fn canon_test(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let key = fold(raw).to_lowercase();
    match TEST_SYNONYMS.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => raw.trim().to_string(),
    }
}

/// Canonical field name for a raw column header.
///
/// Unknown headers pass through as their slug.
pub fn canon_header(raw: &str) -> String {
    let key = slug(raw);
    match HEADER_SYNONYMS.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key,
    }
}

/// Normalizes a free-text service label.
///
/// Returns `"consulta externa"` or `"urgencia general"` when the label is
/// recognized, otherwise the cleaned but unclassified text. Precedence:
///
/// 1. any "consulta externa"-like pattern (tolerant of truncation);
/// 2. an urgency token together with `general`/`gral`;
/// 3. an urgency token alone (a bare `urgencia` counts as general urgency);
/// 4. anything else stays unclassified and is filtered out later.
pub fn normalize_servicio(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let lowered = fold(raw).to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect();
    let mut text = collapse_whitespace(&spaced);
    for (typo, fix) in SERVICE_TYPOS {
        text = text.replace(typo, fix);
    }

    if CONSULTA_EXTERNA_PATTERNS.is_match(&text) {
        return ServiceCategory::ConsultaExterna.as_str().to_string();
    }

    let has_urgency = URGENCY_PATTERNS.is_match(&text);
    if has_urgency && GENERAL_PATTERNS.is_match(&text) {
        return ServiceCategory::UrgenciaGeneral.as_str().to_string();
    }
    if has_urgency {
        return ServiceCategory::UrgenciaGeneral.as_str().to_string();
    }

    text
}

/// Classifies a raw service label into one of the retained categories.
pub fn classify_servicio(raw: &str) -> Option<ServiceCategory> {
    ServiceCategory::parse(&normalize_servicio(raw))
}
