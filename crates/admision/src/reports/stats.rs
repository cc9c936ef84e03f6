//! Aggregate counts over the track-partitioned candidate set.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::domain::JoinedCandidate;
use crate::registry::store::{CandidateStore, RecordFilter, StoreError};
use crate::registry::track::Track;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackStats {
    pub total: u64,
    pub by_department: Vec<CountEntry>,
    pub by_school: Vec<CountEntry>,
    pub by_venue: Vec<CountEntry>,
}

/// Grouped counts by department, school, and venue display label, ordered by
/// count descending with ties broken by label so runs are deterministic.
pub fn stats<S>(store: &S, track: Option<Track>) -> Result<TrackStats, StoreError>
where
    S: CandidateStore,
{
    let filter = RecordFilter {
        track,
        ..RecordFilter::default()
    };
    let total = store.count(&filter)?;
    let rows = store.select(&filter)?;

    Ok(TrackStats {
        total,
        by_department: grouped(&rows, |row| {
            row.departamento.as_ref().map(|d| d.dep_nombre.clone())
        }),
        by_school: grouped(&rows, |row| row.record.esfm.clone()),
        by_venue: grouped(&rows, |row| {
            row.recinto.as_ref().map(|v| v.recinto_nombre.clone())
        }),
    })
}

fn grouped<F>(rows: &[JoinedCandidate], label: F) -> Vec<CountEntry>
where
    F: Fn(&JoinedCandidate) -> Option<String>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for row in rows {
        let label = label(row)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "-".to_string());
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| (Reverse(a.count), &a.label).cmp(&(Reverse(b.count), &b.label)));
    entries
}
