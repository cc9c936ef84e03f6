use serde::Deserialize;

use crate::registry::domain::JoinedCandidate;
use crate::registry::names::NameStyle;
use crate::registry::track::Track;

/// The printable report variants. A variant is pure configuration — title,
/// extra column, and name rendering; pagination and break logic are shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportVariant {
    /// General listing acta across every track.
    #[default]
    Listado,
    /// Scholarship attendance acta.
    Becas,
    /// Merit-process control list.
    Compulsas,
}

impl ReportVariant {
    pub const fn title(self) -> &'static str {
        match self {
            ReportVariant::Listado => "LISTA DE INGRESOS Y OBSERVACIONES",
            ReportVariant::Becas => "ACTA DE ASISTENCIA - POSTULACION BECAS",
            ReportVariant::Compulsas => "LISTA DE CONTROL - COMPULSAS DE MERITOS",
        }
    }

    /// Track partition the document is scoped to. The general listing covers
    /// all tracks (administrative context, no partition).
    pub const fn track(self) -> Option<Track> {
        match self {
            ReportVariant::Listado => None,
            ReportVariant::Becas => Some(Track::Scholarship),
            ReportVariant::Compulsas => Some(Track::CompulsoryMerit),
        }
    }

    pub const fn name_style(self) -> NameStyle {
        match self {
            ReportVariant::Compulsas => NameStyle::FullName,
            _ => NameStyle::Surname,
        }
    }

    pub const fn extra_header(self) -> &'static str {
        match self {
            ReportVariant::Listado => "ESFM",
            ReportVariant::Becas => "RECINTO",
            ReportVariant::Compulsas => "CARGO",
        }
    }

    pub fn extra_value(self, candidate: &JoinedCandidate) -> String {
        let value = match self {
            ReportVariant::Listado => candidate.record.esfm.clone(),
            ReportVariant::Becas => candidate
                .recinto
                .as_ref()
                .map(|venue| venue.recinto_nombre.clone()),
            ReportVariant::Compulsas => candidate.record.cargo.clone(),
        };
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Acta variants carry a third, room-responsible signature line with a
    /// phone field; the merit control list does not.
    pub const fn includes_room_responsible(self) -> bool {
        matches!(self, ReportVariant::Listado | ReportVariant::Becas)
    }
}
