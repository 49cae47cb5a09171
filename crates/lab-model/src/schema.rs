//! Declared report schema.
//!
//! The pivoted tables carry one column per observed `study – test` key. The
//! report projects those dynamic columns onto the fixed list below. Each
//! declared column lists its acceptable (study, test) aliases in priority
//! order; every alias is accepted with either key separator.

use crate::columns::{ID_TRABAJADOR, WIDE_BASE_COLUMNS};

/// Separator written between study and test when building column keys.
pub const KEY_SEPARATOR: &str = " – ";

/// Separators accepted when matching aliases, in priority order.
pub const KEY_SEPARATORS: [&str; 2] = [KEY_SEPARATOR, " - "];

/// One declared report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportColumn {
    /// Output header.
    pub name: &'static str,
    /// Accepted (study, test) pairs, highest priority first.
    pub aliases: &'static [(&'static str, &'static str)],
}

impl ReportColumn {
    /// Expands the aliases into column keys.
    ///
    /// Each pair yields one key per separator, so `("EGO", "pH")` becomes
    /// `"EGO – pH"` followed by `"EGO - pH"`.
    pub fn alias_keys(&self) -> Vec<String> {
        self.aliases
            .iter()
            .flat_map(|(study, test)| {
                KEY_SEPARATORS
                    .iter()
                    .map(move |sep| format!("{study}{sep}{test}"))
            })
            .collect()
    }
}

/// Report columns in output order.
pub const REPORT_SCHEMA: &[ReportColumn] = &[
    ReportColumn {
        name: "Glucosa (EGO)",
        aliases: &[("EGO", "Glucosa"), ("ORINA", "Glucosa")],
    },
    ReportColumn {
        name: "Glucosa (QS)",
        aliases: &[("QS6", "Glucosa"), ("QS4", "Glucosa")],
    },
    ReportColumn {
        name: "Urea (Orina)",
        aliases: &[("EGO", "Urea"), ("ORINA", "Urea")],
    },
    ReportColumn {
        name: "Urea (QS)",
        aliases: &[("QS6", "Urea"), ("QS4", "Urea")],
    },
    ReportColumn {
        name: "Creatinina sérica (QS)",
        aliases: &[("QS6", "Creatinina"), ("QS4", "Creatinina")],
    },
    ReportColumn {
        name: "Tasa de filtración glomerular (QS)",
        aliases: &[
            ("QS6", "Tasa de Filtración Glomerular"),
            ("QS4", "Tasa de Filtración Glomerular"),
            ("QS6", "TFG"),
            ("QS4", "TFG"),
        ],
    },
    ReportColumn {
        name: "Hemoglobina (Biometría Hemática)",
        aliases: &[("BH", "Hemoglobina")],
    },
    ReportColumn {
        name: "Hemoglobina (Sanguínea)",
        aliases: &[("QS6", "Hemoglobina"), ("QS4", "Hemoglobina")],
    },
    ReportColumn {
        name: "Hemoglobina glicosilada",
        aliases: &[
            ("HbA1c", "Hemoglobina Glicosilada"),
            ("HEMOGLOBINA GLICOSILADA", "Hemoglobina Glicosilada"),
        ],
    },
    ReportColumn {
        name: "Proteínas (EGO)",
        aliases: &[("EGO", "Proteínas"), ("ORINA", "Proteínas")],
    },
    ReportColumn {
        name: "Nitritos (EGO)",
        aliases: &[
            ("EGO", "Nitrito"),
            ("EGO", "Nitritos"),
            ("ORINA", "Nitrito"),
            ("ORINA", "Nitritos"),
        ],
    },
    // Blood pH falls back to the urinalysis value when no chemistry panel has one.
    ReportColumn {
        name: "pH (Sanguínea)",
        aliases: &[("QS6", "pH"), ("QS4", "pH"), ("EGO", "pH")],
    },
    ReportColumn {
        name: "Hemoglobina (orina EGO)",
        aliases: &[("EGO", "Hemoglobina"), ("ORINA", "Hemoglobina")],
    },
];

/// Full header of the final report, in output order.
pub fn report_header() -> Vec<&'static str> {
    let mut header = Vec::with_capacity(1 + WIDE_BASE_COLUMNS.len() + REPORT_SCHEMA.len());
    header.push(ID_TRABAJADOR);
    header.extend(WIDE_BASE_COLUMNS);
    header.extend(REPORT_SCHEMA.iter().map(|column| column.name));
    header
}
