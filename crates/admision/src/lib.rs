//! Candidate clearance verification and printable acta reporting for the
//! admission exam service.
//!
//! The crate is read-only over data produced by the upstream registration
//! process: it verifies whether a candidate is cleared under one of three
//! parallel eligibility tracks and generates the operational reports —
//! filtered listings, aggregate counts, and the paginated attendance
//! documents.

pub mod config;
pub mod error;
pub mod registry;
pub mod reports;
pub mod telemetry;
pub mod verification;

pub use error::AppError;
pub use registry::{CandidateStore, InMemoryRegistry, Track};
pub use reports::{FilterCascade, ReportQuery, ReportService, ReportVariant};
pub use verification::VerificationService;
