//! Public eligibility verification: one lookup per track, returning the
//! candidate's assignment details or a user-visible "not cleared" miss.

pub mod router;
pub mod service;
pub mod views;

pub use router::verification_router;
pub use service::{VerificationError, VerificationService};
pub use views::{VerificationView, STATUS_CLEARED};
