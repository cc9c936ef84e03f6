//! The three parallel eligibility tracks and the single partition rule that
//! assigns every candidate record to exactly one of them (or excludes it).
//!
//! The upstream track field is a nullable free-text tag with inconsistent
//! casing, so all comparisons against the markers live here and nowhere else.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::JoinedCandidate;

/// Exact, case-sensitive scholarship marker as stored upstream.
pub const SCHOLARSHIP_TAG: &str = "Becas";

/// Merit marker, matched case-insensitively on input.
pub const MERIT_TAG: &str = "compulsa";

/// Canonical rendering of the merit tag on every outbound surface.
pub const MERIT_TAG_CANONICAL: &str = "COMPULSA";

const MERIT_ADMISSION_YEAR: i32 = 2026;
const MERIT_ADMISSION_MONTH: u32 = 1;
const MERIT_ADMISSION_DAY: u32 = 28;

/// The single calendar day whose registration timestamps gate merit-track
/// eligibility. Build-time configuration, not runtime input.
pub fn merit_admission_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(MERIT_ADMISSION_YEAR, MERIT_ADMISSION_MONTH, MERIT_ADMISSION_DAY)
        .expect("valid merit admission day")
}

/// Inclusive bounds of the admission-day window.
pub fn merit_window() -> (NaiveDateTime, NaiveDateTime) {
    let day = merit_admission_day();
    let start = day.and_hms_opt(0, 0, 0).expect("valid window start");
    let end = day.and_hms_opt(23, 59, 59).expect("valid window end");
    (start, end)
}

pub fn within_merit_window(at: NaiveDateTime) -> bool {
    let (start, end) = merit_window();
    at >= start && at <= end
}

/// One of the three eligibility processes a query can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "becas", alias = "Becas")]
    Scholarship,
    #[serde(rename = "compulsas", alias = "compulsa", alias = "COMPULSA")]
    CompulsoryMerit,
}

impl Track {
    const fn partition(self) -> Partition {
        match self {
            Track::Standard => Partition::Standard,
            Track::Scholarship => Partition::Scholarship,
            Track::CompulsoryMerit => Partition::CompulsoryMerit,
        }
    }
}

/// Where a record lands once the partition rule has run. `Excluded` covers
/// merit-tagged records whose identity timestamp is missing or outside the
/// admission-day window: they match no track at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Standard,
    Scholarship,
    CompulsoryMerit,
    Excluded,
}

/// Assign a raw track tag (plus the linked identity timestamp) to its
/// partition. Null and empty tags are equivalent.
pub fn partition(tag: Option<&str>, person_updated: Option<NaiveDateTime>) -> Partition {
    let tag = match tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => tag,
        None => return Partition::Standard,
    };

    if tag == SCHOLARSHIP_TAG {
        return Partition::Scholarship;
    }

    if tag.eq_ignore_ascii_case(MERIT_TAG) {
        return match person_updated {
            Some(at) if within_merit_window(at) => Partition::CompulsoryMerit,
            _ => Partition::Excluded,
        };
    }

    Partition::Standard
}

/// Track predicate applied to every scoped query. `None` means the generic
/// administrative listing context: no partition, everything included.
pub fn matches(candidate: &JoinedCandidate, track: Option<Track>) -> bool {
    let track = match track {
        Some(track) => track,
        None => return true,
    };

    partition(
        candidate.record.tipo_postulacion.as_deref(),
        candidate.person_updated_at(),
    ) == track.partition()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_window() -> NaiveDateTime {
        merit_admission_day()
            .and_hms_opt(14, 0, 0)
            .expect("valid timestamp")
    }

    fn day_after() -> NaiveDateTime {
        (merit_admission_day() + chrono::Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .expect("valid timestamp")
    }

    fn candidate(tag: Option<&str>, stamp: Option<NaiveDateTime>) -> JoinedCandidate {
        use crate::registry::domain::{CandidateRecord, PersonIdentity};
        JoinedCandidate {
            record: CandidateRecord {
                ci: "1234567".to_string(),
                tipo_postulacion: tag.map(str::to_string),
                ..CandidateRecord::default()
            },
            departamento: None,
            recinto: None,
            persona: stamp.map(|at| PersonIdentity {
                ci: "1234567".to_string(),
                nombre: None,
                paterno: None,
                materno: None,
                nombre_completo: None,
                fecha_actualizado: Some(at),
            }),
        }
    }

    #[test]
    fn every_record_matches_at_most_one_track() {
        let tags = [
            None,
            Some(""),
            Some("Becas"),
            Some("becas"),
            Some("compulsa"),
            Some("Compulsa"),
            Some("COMPULSA"),
            Some("otros"),
        ];
        let stamps = [None, Some(in_window()), Some(day_after())];

        for tag in tags {
            for stamp in stamps {
                let record = candidate(tag, stamp);
                let tracks_matched = [Track::Standard, Track::Scholarship, Track::CompulsoryMerit]
                    .into_iter()
                    .filter(|track| matches(&record, Some(*track)))
                    .count();
                let excluded =
                    partition(tag, stamp) == Partition::Excluded;

                assert_eq!(
                    tracks_matched,
                    if excluded { 0 } else { 1 },
                    "tag {tag:?} with stamp {stamp:?}"
                );
                // The unpartitioned listing context always includes it.
                assert!(matches(&record, None));
            }
        }
    }

    #[test]
    fn unset_and_unknown_tags_are_standard() {
        assert_eq!(partition(None, None), Partition::Standard);
        assert_eq!(partition(Some(""), None), Partition::Standard);
        assert_eq!(partition(Some("  "), None), Partition::Standard);
        assert_eq!(partition(Some("otros"), None), Partition::Standard);
    }

    #[test]
    fn scholarship_marker_is_case_sensitive() {
        assert_eq!(partition(Some("Becas"), None), Partition::Scholarship);
        assert_eq!(partition(Some("becas"), None), Partition::Standard);
    }

    #[test]
    fn merit_marker_is_case_insensitive_and_window_gated() {
        assert_eq!(
            partition(Some("compulsa"), Some(in_window())),
            Partition::CompulsoryMerit
        );
        assert_eq!(
            partition(Some("COMPULSA"), Some(in_window())),
            Partition::CompulsoryMerit
        );
        assert_eq!(
            partition(Some("compulsa"), Some(day_after())),
            Partition::Excluded
        );
        assert_eq!(partition(Some("compulsa"), None), Partition::Excluded);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let (start, end) = merit_window();
        assert!(within_merit_window(start));
        assert!(within_merit_window(end));
        assert!(!within_merit_window(day_after()));
        assert!(within_merit_window(in_window()));
    }
}
