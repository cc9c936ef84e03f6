//! The record query engine: conjunctive filters plus the track-dependent
//! ordering rule, producing the row set both the listing endpoint and the
//! document generator consume.

use serde::Deserialize;

use crate::registry::domain::{parse_exam_datetime, JoinedCandidate};
use crate::registry::store::{CandidateStore, RecordFilter, StoreError};
use crate::registry::track::Track;

/// User-facing filter set. `fecha` carries the raw value handed back by the
/// cascade resolver; only its date component is compared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub departamento: Option<u32>,
    #[serde(default)]
    pub recinto: Option<u32>,
    #[serde(default)]
    pub ci: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub aula: Option<String>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub track: Option<Track>,
}

impl ReportQuery {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            dep_id: self.departamento,
            id_recinto: self.recinto,
            ci: self.ci.clone(),
            fecha: self
                .fecha
                .as_deref()
                .and_then(parse_exam_datetime)
                .map(|dt| dt.date()),
            aula: self.aula.clone(),
            turno: self.turno.clone(),
            track: self.track,
            name_tokens: Vec::new(),
        }
    }
}

/// Fetch and order the records for a query. The merit window gate rides on
/// the track partition inside the filter, so it applies whether or not a
/// date filter was supplied.
pub fn fetch_records<S>(store: &S, query: &ReportQuery) -> Result<Vec<JoinedCandidate>, StoreError>
where
    S: CandidateStore,
{
    let mut rows = store.select(&query.to_filter())?;
    order_records(&mut rows, query.track);
    Ok(rows)
}

/// Track-dependent ordering: merit lists sort by the precomputed full name;
/// everything else by surname-1, surname-2, given name, missing values as
/// empty strings.
pub fn order_records(rows: &mut [JoinedCandidate], track: Option<Track>) {
    match track {
        Some(Track::CompulsoryMerit) => rows.sort_by(|a, b| full_name_key(a).cmp(&full_name_key(b))),
        _ => rows.sort_by(|a, b| surname_key(a).cmp(&surname_key(b))),
    }
}

fn full_name_key(candidate: &JoinedCandidate) -> String {
    candidate
        .persona
        .as_ref()
        .and_then(|p| p.nombre_completo.clone())
        .unwrap_or_default()
}

fn surname_key(candidate: &JoinedCandidate) -> (String, String, String) {
    match candidate.persona.as_ref() {
        Some(person) => (
            person.paterno.clone().unwrap_or_default(),
            person.materno.clone().unwrap_or_default(),
            person.nombre.clone().unwrap_or_default(),
        ),
        None => (String::new(), String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::{CandidateRecord, PersonIdentity};

    fn candidate(ci: &str, paterno: &str, materno: &str, nombre: &str) -> JoinedCandidate {
        JoinedCandidate {
            record: CandidateRecord {
                ci: ci.to_string(),
                ..CandidateRecord::default()
            },
            departamento: None,
            recinto: None,
            persona: Some(PersonIdentity {
                ci: ci.to_string(),
                nombre: Some(nombre.to_string()),
                paterno: Some(paterno.to_string()),
                materno: Some(materno.to_string()),
                nombre_completo: Some(format!("{paterno} {materno} {nombre}")),
                fecha_actualizado: None,
            }),
        }
    }

    #[test]
    fn default_ordering_is_by_surnames_then_given_name() {
        let mut rows = vec![
            candidate("1", "Rojas", "Apaza", "Carla"),
            candidate("2", "Quispe", "Zarate", "Ana"),
            candidate("3", "Quispe", "Apaza", "Beto"),
        ];
        order_records(&mut rows, None);
        let cis: Vec<&str> = rows.iter().map(|r| r.record.ci.as_str()).collect();
        assert_eq!(cis, ["3", "2", "1"]);
    }

    #[test]
    fn merit_ordering_uses_precomputed_full_name() {
        let mut rows = vec![
            candidate("1", "Zarate", "Luna", "Ana"),
            candidate("2", "Apaza", "Mamani", "Rosa"),
        ];
        order_records(&mut rows, Some(Track::CompulsoryMerit));
        let cis: Vec<&str> = rows.iter().map(|r| r.record.ci.as_str()).collect();
        assert_eq!(cis, ["2", "1"]);
    }

    #[test]
    fn records_without_person_sort_first() {
        let mut rows = vec![
            candidate("1", "Quispe", "Apaza", "Ana"),
            JoinedCandidate {
                record: CandidateRecord {
                    ci: "2".to_string(),
                    ..CandidateRecord::default()
                },
                departamento: None,
                recinto: None,
                persona: None,
            },
        ];
        order_records(&mut rows, None);
        assert_eq!(rows[0].record.ci, "2");
    }

    #[test]
    fn query_date_filter_keeps_only_the_date_component() {
        let query = ReportQuery {
            fecha: Some("2026-01-28T14:00:00".to_string()),
            ..ReportQuery::default()
        };
        let filter = query.to_filter();
        assert_eq!(
            filter.fecha,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 28)
        );
    }
}
