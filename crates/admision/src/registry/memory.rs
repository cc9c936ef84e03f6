use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{CandidateRecord, Department, JoinedCandidate, PersonIdentity, Venue};
use super::store::{CandidateStore, RecordFilter, StoreError};

/// In-memory registry backing the service and the test suites. Reference
/// data and candidate rows are loaded once at startup and only read after
/// that, so a plain mutex is enough.
#[derive(Default, Clone)]
pub struct InMemoryRegistry {
    inner: Arc<Mutex<RegistryData>>,
}

#[derive(Default)]
struct RegistryData {
    departments: Vec<Department>,
    venues: Vec<Venue>,
    candidates: Vec<CandidateRecord>,
    persons: HashMap<String, PersonIdentity>,
}

impl InMemoryRegistry {
    pub fn insert_department(&self, department: Department) {
        let mut guard = self.inner.lock().expect("registry mutex poisoned");
        guard.departments.push(department);
    }

    pub fn insert_venue(&self, venue: Venue) {
        let mut guard = self.inner.lock().expect("registry mutex poisoned");
        guard.venues.push(venue);
    }

    pub fn insert_candidate(&self, candidate: CandidateRecord) {
        let mut guard = self.inner.lock().expect("registry mutex poisoned");
        guard.candidates.push(candidate);
    }

    pub fn insert_person(&self, person: PersonIdentity) {
        let mut guard = self.inner.lock().expect("registry mutex poisoned");
        guard.persons.insert(person.ci.clone(), person);
    }

    pub fn len(&self) -> usize {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        guard.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegistryData {
    fn join(&self, record: &CandidateRecord) -> JoinedCandidate {
        let departamento = record
            .dep_id
            .and_then(|dep_id| self.departments.iter().find(|d| d.dep_id == dep_id))
            .cloned();
        let recinto = record
            .id_recinto
            .and_then(|id| self.venues.iter().find(|v| v.id_recinto == id))
            .cloned();
        let persona = self.persons.get(&record.ci).cloned();

        JoinedCandidate {
            record: record.clone(),
            departamento,
            recinto,
            persona,
        }
    }
}

impl CandidateStore for InMemoryRegistry {
    fn select(&self, filter: &RecordFilter) -> Result<Vec<JoinedCandidate>, StoreError> {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        Ok(guard
            .candidates
            .iter()
            .map(|record| guard.join(record))
            .filter(|candidate| filter.matches(candidate))
            .collect())
    }

    fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError> {
        self.select(filter).map(|rows| rows.len() as u64)
    }

    fn departments(&self) -> Result<Vec<Department>, StoreError> {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        Ok(guard.departments.clone())
    }

    fn venues_of_department(&self, dep_id: u32) -> Result<Vec<Venue>, StoreError> {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        Ok(guard
            .venues
            .iter()
            .filter(|venue| venue.dep_id == dep_id)
            .cloned()
            .collect())
    }

    fn department(&self, dep_id: u32) -> Result<Option<Department>, StoreError> {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        Ok(guard.departments.iter().find(|d| d.dep_id == dep_id).cloned())
    }

    fn venue(&self, id_recinto: u32) -> Result<Option<Venue>, StoreError> {
        let guard = self.inner.lock().expect("registry mutex poisoned");
        Ok(guard
            .venues
            .iter()
            .find(|v| v.id_recinto == id_recinto)
            .cloned())
    }
}
