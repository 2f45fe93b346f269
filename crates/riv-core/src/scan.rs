//! Scan output records.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display label for a zone that is empty or does not exist.
pub const EMPTY_LABEL: &str = "Empty";
/// Display label for a zone whose fetch failed.
pub const ERROR_LABEL: &str = "Error";
/// Display label for an active zone without routed categories.
pub const NO_CATEGORY_LABEL: &str = "N/A";

/// Outcome class of a single zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneStatus {
    Empty,
    Active,
    Error,
}

impl ZoneStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Active => "Active",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counts for one zone. Built once per zone and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub zone_id: String,
    pub status: ZoneStatus,
    pub pallet_count: u32,
    /// Always 0 for surface scans.
    pub unit_count: u64,
    pub sortation_categories: BTreeSet<String>,
    /// Sorted, comma-joined categories, or `Empty`/`Error`/`N/A`.
    pub sortation_category: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// A zone with no children, or one the API rejected with 400.
    #[must_use]
    pub fn empty(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            status: ZoneStatus::Empty,
            pallet_count: 0,
            unit_count: 0,
            sortation_categories: BTreeSet::new(),
            sortation_category: EMPTY_LABEL.to_string(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    /// A zone whose fetch failed for any reason other than 400.
    #[must_use]
    pub fn error(zone_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            status: ZoneStatus::Error,
            pallet_count: 0,
            unit_count: 0,
            sortation_categories: BTreeSet::new(),
            sortation_category: ERROR_LABEL.to_string(),
            last_updated: Utc::now(),
            error: Some(message.into()),
        }
    }

    /// A zone holding pallets.
    #[must_use]
    pub fn active(
        zone_id: impl Into<String>,
        pallet_count: u32,
        unit_count: u64,
        sortation_categories: BTreeSet<String>,
    ) -> Self {
        let sortation_category = if sortation_categories.is_empty() {
            NO_CATEGORY_LABEL.to_string()
        } else {
            sortation_categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            zone_id: zone_id.into(),
            status: ZoneStatus::Active,
            pallet_count,
            unit_count,
            sortation_categories,
            sortation_category,
            last_updated: Utc::now(),
            error: None,
        }
    }
}

/// A tote-level Clean Decant Date seen while descending a pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CddCandidate {
    /// Raw `DD-MM-YYYY[ HH:MM]` text as reported on the tote.
    pub timestamp: String,
    pub tote_id: String,
    pub pallet_id: String,
    pub zone_id: String,
    pub units: u64,
    pub sortation_category: Option<String>,
    pub destination: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_result_has_zero_counts_and_label() {
        let result = ScanResult::empty("DZ-1");
        assert_eq!(result.status, ZoneStatus::Empty);
        assert_eq!((result.pallet_count, result.unit_count), (0, 0));
        assert_eq!(result.sortation_category, "Empty");
    }

    #[test]
    fn error_result_keeps_message() {
        let result = ScanResult::error("DZ-1", "timed out");
        assert_eq!(result.sortation_category, "Error");
        assert_eq!(result.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn active_label_is_sorted_and_joined() {
        let categories = ["SC-B", "SC-A"].into_iter().map(String::from).collect();
        let result = ScanResult::active("DZ-1", 2, 0, categories);
        assert_eq!(result.sortation_category, "SC-A, SC-B");
    }

    #[test]
    fn active_without_categories_is_na() {
        let result = ScanResult::active("DZ-1", 1, 0, BTreeSet::new());
        assert_eq!(result.sortation_category, "N/A");
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_value(ScanResult::empty("DZ-1")).unwrap();
        assert_eq!(json["status"], "Empty");
        assert_eq!(json["zoneId"], "DZ-1");
        assert!(json.get("error").is_none());
    }
}
