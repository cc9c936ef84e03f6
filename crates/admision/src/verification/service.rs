use std::sync::Arc;

use crate::registry::store::{CandidateStore, RecordFilter, StoreError};
use crate::registry::track::Track;

use super::views::VerificationView;

pub const NOT_FOUND_STANDARD: &str = "CI no encontrado o no habilitado";
pub const NOT_FOUND_SCHOLARSHIP: &str = "CI no encontrado o no habilitado para Becas";
pub const NOT_FOUND_MERIT: &str = "CI no encontrado o no habilitado para Compulsas";

/// Single-record eligibility lookups for the three tracks. Lookups either
/// return a complete view or fail; there are no partial records.
pub struct VerificationService<S> {
    store: Arc<S>,
}

/// Error raised by verification lookups.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S> VerificationService<S>
where
    S: CandidateStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn verify_standard(&self, ci: &str) -> Result<VerificationView, VerificationError> {
        self.lookup_by_ci(ci, Track::Standard, NOT_FOUND_STANDARD)
    }

    pub fn verify_scholarship(&self, ci: &str) -> Result<VerificationView, VerificationError> {
        self.lookup_by_ci(ci, Track::Scholarship, NOT_FOUND_SCHOLARSHIP)
    }

    /// Merit lookups enforce the admission-day window through the track
    /// partition, and fall back to a fuzzy name search when the CI misses:
    /// merit registration data is entered by hand and identity numbers are
    /// the field most often mistyped.
    pub fn verify_merit(
        &self,
        ci: Option<&str>,
        name: Option<&str>,
    ) -> Result<VerificationView, VerificationError> {
        if let Some(ci) = ci.map(str::trim).filter(|ci| !ci.is_empty()) {
            match self.lookup_by_ci(ci, Track::CompulsoryMerit, NOT_FOUND_MERIT) {
                Err(VerificationError::NotFound(_)) => {}
                other => return other,
            }
        }

        if let Some(tokens) = name.map(name_tokens).filter(|tokens| !tokens.is_empty()) {
            let filter = RecordFilter {
                name_tokens: tokens,
                ..RecordFilter::for_track(Track::CompulsoryMerit)
            };
            if let Some(found) = self.store.select(&filter)?.into_iter().next() {
                return Ok(VerificationView::from_candidate(&found, Track::CompulsoryMerit));
            }
        }

        Err(VerificationError::NotFound(NOT_FOUND_MERIT))
    }

    fn lookup_by_ci(
        &self,
        ci: &str,
        track: Track,
        missing: &'static str,
    ) -> Result<VerificationView, VerificationError> {
        let filter = RecordFilter {
            ci: Some(ci.trim().to_string()),
            ..RecordFilter::for_track(track)
        };
        let found = self
            .store
            .select(&filter)?
            .into_iter()
            .next()
            .ok_or(VerificationError::NotFound(missing))?;
        Ok(VerificationView::from_candidate(&found, track))
    }
}

/// Normalize a supplied name into search tokens: trim, collapse internal
/// whitespace, split on spaces.
fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_tokens_collapse_whitespace() {
        assert_eq!(
            name_tokens("  Quispe   Mamani  Ana "),
            vec!["Quispe", "Mamani", "Ana"]
        );
        assert!(name_tokens("   ").is_empty());
    }
}
