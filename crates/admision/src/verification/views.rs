use serde::Serialize;

use crate::registry::domain::JoinedCandidate;
use crate::registry::names::{display_name, NameStyle};
use crate::registry::track::{Track, MERIT_TAG_CANONICAL};

/// Status literal returned for every successful verification.
pub const STATUS_CLEARED: &str = "HABILITADO";

/// Outbound verification payload. Field names keep the upstream Spanish keys
/// consumed by the public verification pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationView {
    pub ci: String,
    pub nombre_completo: String,
    pub departamento: String,
    pub esfm: Option<String>,
    pub municipio: Option<String>,
    pub recinto: String,
    pub direccion_recinto: Option<String>,
    pub fecha: Option<String>,
    pub aula: Option<String>,
    pub turno: Option<String>,
    pub equipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discapacidad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_postulacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    pub estado: &'static str,
}

impl VerificationView {
    pub fn from_candidate(candidate: &JoinedCandidate, track: Track) -> Self {
        let style = match track {
            Track::CompulsoryMerit => NameStyle::FullName,
            _ => NameStyle::Surname,
        };

        let (discapacidad, tipo_postulacion, cargo) = match track {
            Track::Standard => (None, None, None),
            Track::Scholarship => (
                candidate.record.discapacidad.clone(),
                candidate.record.tipo_postulacion.clone(),
                None,
            ),
            Track::CompulsoryMerit => (
                None,
                Some(MERIT_TAG_CANONICAL.to_string()),
                candidate.record.cargo.clone(),
            ),
        };

        Self {
            ci: candidate.record.ci.clone(),
            nombre_completo: display_name(candidate.persona.as_ref(), style),
            departamento: candidate
                .departamento
                .as_ref()
                .map(|d| d.dep_nombre.clone())
                .unwrap_or_else(|| "-".to_string()),
            esfm: candidate.record.esfm.clone(),
            municipio: candidate.record.municipio.clone(),
            recinto: candidate
                .recinto
                .as_ref()
                .map(|v| v.recinto_nombre.clone())
                .unwrap_or_else(|| "-".to_string()),
            direccion_recinto: candidate.record.direccion.clone(),
            fecha: candidate.record.fecha.clone(),
            aula: candidate.record.aula.clone(),
            turno: candidate.record.turno.clone(),
            equipo: candidate.record.equipo.clone(),
            discapacidad,
            tipo_postulacion,
            cargo,
            estado: STATUS_CLEARED,
        }
    }
}
