//! The candidate registry: domain model, track partition rule, storage seam,
//! and the CSV seed importer.

pub mod domain;
pub mod import;
pub mod memory;
pub mod names;
pub mod store;
pub mod track;

pub use domain::{CandidateRecord, Department, JoinedCandidate, PersonIdentity, Venue};
pub use memory::InMemoryRegistry;
pub use store::{CandidateStore, RecordFilter, StoreError};
pub use track::Track;
