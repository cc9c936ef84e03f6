use chrono::NaiveDate;
use thiserror::Error;

use super::domain::{Department, JoinedCandidate, Venue};
use super::track::{self, Track};

/// Filter grammar shared by `select` and `count`. All criteria are optional
/// and conjunctive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub dep_id: Option<u32>,
    pub id_recinto: Option<u32>,
    pub ci: Option<String>,
    /// Compared against the date component of the record's exam stamp,
    /// ignoring time-of-day.
    pub fecha: Option<NaiveDate>,
    pub aula: Option<String>,
    pub turno: Option<String>,
    pub track: Option<Track>,
    /// Ordered, case-insensitive "contains all tokens" match against the
    /// person's precomputed full name. Empty means no name constraint.
    pub name_tokens: Vec<String>,
}

impl RecordFilter {
    pub fn for_track(track: Track) -> Self {
        Self {
            track: Some(track),
            ..Self::default()
        }
    }

    /// The one place query semantics live; every store backend delegates
    /// here so filters cannot drift between implementations.
    pub fn matches(&self, candidate: &JoinedCandidate) -> bool {
        if let Some(dep_id) = self.dep_id {
            if candidate.record.dep_id != Some(dep_id) {
                return false;
            }
        }

        if let Some(id_recinto) = self.id_recinto {
            if candidate.record.id_recinto != Some(id_recinto) {
                return false;
            }
        }

        if let Some(ci) = self.ci.as_deref() {
            if candidate.record.ci != ci {
                return false;
            }
        }

        if let Some(fecha) = self.fecha {
            if candidate.exam_date() != Some(fecha) {
                return false;
            }
        }

        if let Some(aula) = self.aula.as_deref() {
            if candidate.record.aula.as_deref() != Some(aula) {
                return false;
            }
        }

        if let Some(turno) = self.turno.as_deref() {
            if candidate.record.turno.as_deref() != Some(turno) {
                return false;
            }
        }

        if !track::matches(candidate, self.track) {
            return false;
        }

        if !self.name_tokens.is_empty() {
            let full = candidate
                .persona
                .as_ref()
                .and_then(|p| p.nombre_completo.as_deref())
                .unwrap_or_default();
            if !contains_tokens_in_order(full, &self.name_tokens) {
                return false;
            }
        }

        true
    }
}

fn contains_tokens_in_order(haystack: &str, tokens: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    let mut rest = haystack.as_str();
    for token in tokens {
        let token = token.to_lowercase();
        match rest.find(&token) {
            Some(at) => rest = &rest[at + token.len()..],
            None => return false,
        }
    }
    true
}

/// Read-only storage seam for the candidate registry, so the query engines
/// can be exercised without a database.
pub trait CandidateStore: Send + Sync {
    fn select(&self, filter: &RecordFilter) -> Result<Vec<JoinedCandidate>, StoreError>;
    fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError>;
    fn departments(&self) -> Result<Vec<Department>, StoreError>;
    fn venues_of_department(&self, dep_id: u32) -> Result<Vec<Venue>, StoreError>;
    fn department(&self, dep_id: u32) -> Result<Option<Department>, StoreError>;
    fn venue(&self, id_recinto: u32) -> Result<Option<Venue>, StoreError>;
}

/// Store failure surfaced to the query engines.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::{CandidateRecord, PersonIdentity};

    fn candidate(fecha: Option<&str>) -> JoinedCandidate {
        JoinedCandidate {
            record: CandidateRecord {
                ci: "5551234".to_string(),
                fecha: fecha.map(str::to_string),
                ..CandidateRecord::default()
            },
            departamento: None,
            recinto: None,
            persona: None,
        }
    }

    #[test]
    fn date_filter_ignores_time_of_day() {
        let filter = RecordFilter {
            fecha: NaiveDate::from_ymd_opt(2026, 1, 28),
            ..RecordFilter::default()
        };

        assert!(filter.matches(&candidate(Some("2026-01-28T14:00:00"))));
        assert!(filter.matches(&candidate(Some("2026-01-28"))));
        assert!(!filter.matches(&candidate(Some("2026-01-29T00:00:00"))));
        assert!(!filter.matches(&candidate(None)));
    }

    #[test]
    fn unparseable_exam_dates_never_match_a_date_filter() {
        let filter = RecordFilter {
            fecha: NaiveDate::from_ymd_opt(2026, 1, 28),
            ..RecordFilter::default()
        };
        assert!(!filter.matches(&candidate(Some("enero 28"))));
    }

    #[test]
    fn name_tokens_match_in_order_case_insensitively() {
        let mut row = candidate(None);
        row.persona = Some(PersonIdentity {
            ci: "5551234".to_string(),
            nombre: None,
            paterno: None,
            materno: None,
            nombre_completo: Some("Quispe Mamani Ana Maria".to_string()),
            fecha_actualizado: None,
        });

        let matching = RecordFilter {
            name_tokens: vec!["quispe".to_string(), "ana".to_string()],
            ..RecordFilter::default()
        };
        assert!(matching.matches(&row));

        let out_of_order = RecordFilter {
            name_tokens: vec!["ana".to_string(), "quispe".to_string()],
            ..RecordFilter::default()
        };
        assert!(!out_of_order.matches(&row));
    }
}
