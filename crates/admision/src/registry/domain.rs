use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Immutable reference data: a geographic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub dep_id: u32,
    pub dep_nombre: String,
}

/// Immutable reference data: a physical examination site. The department id
/// is denormalized onto the venue so department filters never need a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id_recinto: u32,
    pub recinto_nombre: String,
    pub dep_id: u32,
}

/// Authoritative name source, keyed by the same CI as the candidate record.
/// The candidate record borrows it by key and never owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonIdentity {
    pub ci: String,
    pub nombre: Option<String>,
    pub paterno: Option<String>,
    pub materno: Option<String>,
    pub nombre_completo: Option<String>,
    pub fecha_actualizado: Option<NaiveDateTime>,
}

/// One registered candidate. `fecha` is kept as the raw upstream string;
/// registration exports are entered manually and do not always parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub ci: String,
    pub dep_id: Option<u32>,
    pub id_recinto: Option<u32>,
    pub esfm: Option<String>,
    pub municipio: Option<String>,
    pub direccion: Option<String>,
    pub fecha: Option<String>,
    pub aula: Option<String>,
    pub turno: Option<String>,
    pub equipo: Option<String>,
    pub tipo_postulacion: Option<String>,
    pub discapacidad: Option<String>,
    pub cargo: Option<String>,
}

/// Joined projection returned by store queries: the candidate record plus
/// whichever related rows exist for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedCandidate {
    #[serde(flatten)]
    pub record: CandidateRecord,
    pub departamento: Option<Department>,
    pub recinto: Option<Venue>,
    pub persona: Option<PersonIdentity>,
}

impl JoinedCandidate {
    pub fn person_updated_at(&self) -> Option<NaiveDateTime> {
        self.persona.as_ref().and_then(|p| p.fecha_actualizado)
    }

    /// Calendar date of the exam, when the raw value parses.
    pub fn exam_date(&self) -> Option<NaiveDate> {
        self.record
            .fecha
            .as_deref()
            .and_then(parse_exam_datetime)
            .map(|dt| dt.date())
    }
}

/// Lenient parse for upstream date-time strings. Registration data arrives in
/// several shapes; anything else stays a raw string.
pub fn parse_exam_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
