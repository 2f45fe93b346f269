//! Oldest Clean Decant Date, cross-checked against item-level data.
//!
//! A tote's own `cleanDecantDate` is sometimes inherited rather than measured.
//! Candidates are tried oldest first; a candidate is verified when at least
//! one item inside the tote carries the same date.

use chrono::NaiveDateTime;
use riv_core::CddCandidate;
use riv_core::dates::{format_legacy_date, parse_legacy_date};
use riv_gateway::{ContainerSource, FetchOptions};
use serde::Serialize;

/// The resolved CDD for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CddResolution {
    pub timestamp: NaiveDateTime,
    /// The date exactly as the tote reported it.
    pub raw: String,
    /// Human-readable form, e.g. `Wed 07 May 02:07`.
    pub display: String,
    /// `false` means no candidate could be confirmed and this is the oldest
    /// tote-level value.
    pub verified: bool,
    pub tote_id: String,
    pub pallet_id: String,
    pub zone_id: String,
    pub units: u64,
    pub sortation_category: Option<String>,
    pub destination: Option<String>,
    /// Verification fetches performed.
    pub checked: usize,
}

impl CddResolution {
    fn new(timestamp: NaiveDateTime, candidate: &CddCandidate, verified: bool, checked: usize) -> Self {
        Self {
            timestamp,
            raw: candidate.timestamp.clone(),
            display: format_legacy_date(&candidate.timestamp),
            verified,
            tote_id: candidate.tote_id.clone(),
            pallet_id: candidate.pallet_id.clone(),
            zone_id: candidate.zone_id.clone(),
            units: candidate.units,
            sortation_category: candidate.sortation_category.clone(),
            destination: candidate.destination.clone(),
            checked,
        }
    }
}

/// Parse and sort candidates oldest first. Ties keep their scan order.
/// Unparseable dates are dropped with a warning.
#[must_use]
pub fn rank_candidates(candidates: &[CddCandidate]) -> Vec<(NaiveDateTime, &CddCandidate)> {
    let mut ranked: Vec<_> = candidates
        .iter()
        .filter_map(|candidate| match parse_legacy_date(&candidate.timestamp) {
            Ok(timestamp) => Some((timestamp, candidate)),
            Err(error) => {
                tracing::warn!(tote_id = %candidate.tote_id, %error, "dropping CDD candidate");
                None
            }
        })
        .collect();
    ranked.sort_by_key(|(timestamp, _)| *timestamp);
    ranked
}

pub struct CddResolver<S> {
    source: S,
}

impl<S: ContainerSource> CddResolver<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve the oldest verifiable CDD among `candidates`.
    ///
    /// Returns `None` only when no candidate has a parseable date. Otherwise
    /// the first verified candidate wins, falling back to the oldest one with
    /// `verified: false`.
    pub async fn resolve(&self, candidates: &[CddCandidate]) -> Option<CddResolution> {
        let ranked = rank_candidates(candidates);
        let (oldest_at, oldest) = *ranked.first()?;

        for (checked, (timestamp, candidate)) in ranked.iter().enumerate() {
            if self.verify(*timestamp, candidate).await {
                tracing::debug!(tote_id = %candidate.tote_id, checked = checked + 1, "CDD verified");
                return Some(CddResolution::new(*timestamp, candidate, true, checked + 1));
            }
        }

        tracing::info!(
            tote_id = %oldest.tote_id,
            checked = ranked.len(),
            "no CDD candidate verified; reporting oldest tote-level date"
        );
        Some(CddResolution::new(oldest_at, oldest, false, ranked.len()))
    }

    async fn verify(&self, timestamp: NaiveDateTime, candidate: &CddCandidate) -> bool {
        let tote = match self
            .source
            .fetch_container(&candidate.tote_id, FetchOptions::silent())
            .await
        {
            Ok(tote) => tote,
            Err(error) => {
                tracing::debug!(tote_id = %candidate.tote_id, %error, "verification fetch failed");
                return false;
            }
        };

        let raw = candidate.timestamp.trim();
        tote.children()
            .iter()
            .filter_map(|item| item.clean_decant_date())
            .any(|date| date == raw || parse_legacy_date(date).is_ok_and(|parsed| parsed == timestamp))
    }
}
