//! The cascade resolver feeding the report filter chain: department →
//! venue → (date, room, shift).
//!
//! Department and venue enumeration are listing-style calls and degrade to
//! an empty list when the store is unreachable. The drill-downs propagate
//! failures: callers build mandatory filter chains from them, and an empty
//! result would be indistinguishable from "no data at this level".

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::registry::domain::{parse_exam_datetime, Department, Venue};
use crate::registry::store::{CandidateStore, RecordFilter, StoreError};
use crate::registry::track::Track;

/// One distinct exam date at a venue: preformatted display text plus the raw
/// value the caller passes back as a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOption {
    pub display: String,
    pub value: String,
}

pub struct FilterCascade<S> {
    store: Arc<S>,
}

impl<S> FilterCascade<S>
where
    S: CandidateStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn departments(&self) -> Vec<Department> {
        match self.store.departments() {
            Ok(departments) => departments,
            Err(error) => {
                warn!(%error, "department listing unavailable");
                Vec::new()
            }
        }
    }

    /// Venues are shared infrastructure across tracks; no track filter
    /// applies here.
    pub fn venues_of_department(&self, dep_id: u32) -> Vec<Venue> {
        match self.store.venues_of_department(dep_id) {
            Ok(venues) => venues,
            Err(error) => {
                warn!(%error, dep_id, "venue listing unavailable");
                Vec::new()
            }
        }
    }

    pub fn dates_of_venue(
        &self,
        id_recinto: u32,
        track: Option<Track>,
    ) -> Result<Vec<DateOption>, StoreError> {
        let values = self.distinct(id_recinto, track, |record| record.fecha.clone())?;
        Ok(values
            .into_iter()
            .map(|raw| DateOption {
                display: format_display_date(&raw),
                value: raw,
            })
            .collect())
    }

    pub fn rooms_of_venue(
        &self,
        id_recinto: u32,
        track: Option<Track>,
    ) -> Result<Vec<String>, StoreError> {
        self.distinct(id_recinto, track, |record| record.aula.clone())
    }

    pub fn shifts_of_venue(
        &self,
        id_recinto: u32,
        track: Option<Track>,
    ) -> Result<Vec<String>, StoreError> {
        self.distinct(id_recinto, track, |record| record.turno.clone())
    }

    fn distinct<F>(
        &self,
        id_recinto: u32,
        track: Option<Track>,
        field: F,
    ) -> Result<Vec<String>, StoreError>
    where
        F: Fn(&crate::registry::domain::CandidateRecord) -> Option<String>,
    {
        let filter = RecordFilter {
            id_recinto: Some(id_recinto),
            track,
            ..RecordFilter::default()
        };
        let rows = self.store.select(&filter)?;

        let mut values = Vec::new();
        for row in rows {
            if let Some(value) = field(&row.record).filter(|v| !v.is_empty()) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }
        Ok(values)
    }
}

/// Render a raw exam date as `DD/MM/YYYY`; unparseable values pass through
/// verbatim rather than raising.
pub fn format_display_date(raw: &str) -> String {
    match parse_exam_datetime(raw) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::CandidateRecord;
    use crate::registry::memory::InMemoryRegistry;

    fn seeded() -> InMemoryRegistry {
        let registry = InMemoryRegistry::default();
        registry.insert_department(Department {
            dep_id: 5,
            dep_nombre: "Cochabamba".to_string(),
        });
        for (id, name) in [(10, "Recinto Norte"), (11, "Recinto Sur"), (12, "Recinto Este")] {
            registry.insert_venue(Venue {
                id_recinto: id,
                recinto_nombre: name.to_string(),
                dep_id: 5,
            });
        }
        registry.insert_venue(Venue {
            id_recinto: 20,
            recinto_nombre: "Otro".to_string(),
            dep_id: 6,
        });

        for (ci, fecha, aula) in [
            ("1", "2026-01-28T08:00:00", "A-1"),
            ("2", "2026-01-28T08:00:00", "A-2"),
            ("3", "2026-01-29T08:00:00", "A-1"),
        ] {
            registry.insert_candidate(CandidateRecord {
                ci: ci.to_string(),
                id_recinto: Some(10),
                fecha: Some(fecha.to_string()),
                aula: Some(aula.to_string()),
                turno: Some("MANANA".to_string()),
                ..CandidateRecord::default()
            });
        }
        registry
    }

    #[test]
    fn venues_of_department_returns_only_that_department() {
        let cascade = FilterCascade::new(Arc::new(seeded()));
        let venues = cascade.venues_of_department(5);
        assert_eq!(venues.len(), 3);
        assert!(venues.iter().all(|v| v.dep_id == 5));
    }

    #[test]
    fn dates_are_distinct_and_formatted() {
        let cascade = FilterCascade::new(Arc::new(seeded()));
        let dates = cascade.dates_of_venue(10, None).expect("dates resolve");
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].display, "28/01/2026");
        assert_eq!(dates[0].value, "2026-01-28T08:00:00");
    }

    #[test]
    fn rooms_are_distinct() {
        let cascade = FilterCascade::new(Arc::new(seeded()));
        let rooms = cascade.rooms_of_venue(10, None).expect("rooms resolve");
        assert_eq!(rooms, ["A-1", "A-2"]);
    }

    #[test]
    fn unparseable_dates_pass_through_verbatim() {
        assert_eq!(format_display_date("proximamente"), "proximamente");
        assert_eq!(format_display_date("2026-01-28"), "28/01/2026");
    }

    /// Store double that is always down.
    struct UnavailableStore;

    impl CandidateStore for UnavailableStore {
        fn select(
            &self,
            _filter: &RecordFilter,
        ) -> Result<Vec<crate::registry::domain::JoinedCandidate>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn count(&self, _filter: &RecordFilter) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn departments(&self) -> Result<Vec<Department>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn venues_of_department(&self, _dep_id: u32) -> Result<Vec<Venue>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn department(&self, _dep_id: u32) -> Result<Option<Department>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn venue(&self, _id_recinto: u32) -> Result<Option<Venue>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn listing_calls_swallow_outages_but_drill_downs_propagate() {
        let cascade = FilterCascade::new(Arc::new(UnavailableStore));

        assert!(cascade.departments().is_empty());
        assert!(cascade.venues_of_department(5).is_empty());

        assert!(cascade.dates_of_venue(10, None).is_err());
        assert!(cascade.rooms_of_venue(10, None).is_err());
        assert!(cascade.shifts_of_venue(10, None).is_err());
    }
}
