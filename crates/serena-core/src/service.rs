//! # Service Types
//!
//! The closed set of bookable service codes. An appointment request must
//! name one of these ten codes; anything else is rejected at creation time.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bookable therapy/course codes.
///
/// Serializes to the exact wire codes the booking form submits
/// (e.g. `"mindfulness-individual"`). The set is closed: `parse` is the
/// only way in, and unknown codes fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ServiceType {
    #[serde(rename = "cirugia-astral")]
    CirugiaAstral,
    #[serde(rename = "mindfulness-individual")]
    MindfulnessIndividual,
    #[serde(rename = "mindfulness-grupal")]
    MindfulnessGrupal,
    #[serde(rename = "coach-ontologico")]
    CoachOntologico,
    #[serde(rename = "masaje-tui-na")]
    MasajeTuiNa,
    #[serde(rename = "reiki")]
    Reiki,
    #[serde(rename = "medicina-cuantica")]
    MedicinaCuantica,
    #[serde(rename = "curso-mindfulness-4-semanas")]
    CursoMindfulness4Semanas,
    #[serde(rename = "curso-mindfulness-8-semanas")]
    CursoMindfulness8Semanas,
    #[serde(rename = "instructorado-mindfulness")]
    InstructoradoMindfulness,
}

impl ServiceType {
    /// All ten service codes, in catalog order.
    pub const ALL: [ServiceType; 10] = [
        Self::CirugiaAstral,
        Self::MindfulnessIndividual,
        Self::MindfulnessGrupal,
        Self::CoachOntologico,
        Self::MasajeTuiNa,
        Self::Reiki,
        Self::MedicinaCuantica,
        Self::CursoMindfulness4Semanas,
        Self::CursoMindfulness8Semanas,
        Self::InstructoradoMindfulness,
    ];

    /// Return the wire code for this service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CirugiaAstral => "cirugia-astral",
            Self::MindfulnessIndividual => "mindfulness-individual",
            Self::MindfulnessGrupal => "mindfulness-grupal",
            Self::CoachOntologico => "coach-ontologico",
            Self::MasajeTuiNa => "masaje-tui-na",
            Self::Reiki => "reiki",
            Self::MedicinaCuantica => "medicina-cuantica",
            Self::CursoMindfulness4Semanas => "curso-mindfulness-4-semanas",
            Self::CursoMindfulness8Semanas => "curso-mindfulness-8-semanas",
            Self::InstructoradoMindfulness => "instructorado-mindfulness",
        }
    }

    /// Parse a wire code. Returns `None` for anything outside the closed set.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == code)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_codes_roundtrip_through_parse() {
        for service in ServiceType::ALL {
            assert_eq!(ServiceType::parse(service.as_str()), Some(service));
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(ServiceType::parse("deep-tissue-massage"), None);
        assert_eq!(ServiceType::parse(""), None);
        // Close but not exact — the set is closed, not fuzzy.
        assert_eq!(ServiceType::parse("Reiki"), None);
        assert_eq!(ServiceType::parse("reiki "), None);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ServiceType::CursoMindfulness4Semanas).unwrap();
        assert_eq!(json, "\"curso-mindfulness-4-semanas\"");

        let parsed: ServiceType = serde_json::from_str("\"masaje-tui-na\"").unwrap();
        assert_eq!(parsed, ServiceType::MasajeTuiNa);
    }

    #[test]
    fn exactly_ten_services() {
        assert_eq!(ServiceType::ALL.len(), 10);
    }
}
