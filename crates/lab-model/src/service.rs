//! Service categories retained by the pipeline.

use serde::{Deserialize, Serialize};

/// The two clinical service categories a row may belong to.
///
/// Rows whose normalized service is anything else are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    ConsultaExterna,
    UrgenciaGeneral,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 2] = [Self::ConsultaExterna, Self::UrgenciaGeneral];

    /// Canonical label written to `servicio_norm`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConsultaExterna => "consulta externa",
            Self::UrgenciaGeneral => "urgencia general",
        }
    }

    /// Matches a normalized service label exactly.
    pub fn parse(normalized: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(
            ServiceCategory::parse("consulta externa"),
            Some(ServiceCategory::ConsultaExterna)
        );
        assert_eq!(
            ServiceCategory::parse("urgencia general"),
            Some(ServiceCategory::UrgenciaGeneral)
        );
        assert_eq!(ServiceCategory::parse("Consulta Externa"), None);
        assert_eq!(ServiceCategory::parse("pediatria"), None);
        assert_eq!(ServiceCategory::parse(""), None);
    }
}
