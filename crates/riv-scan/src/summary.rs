//! Scan totals for display.

use std::collections::BTreeMap;

use riv_core::{DestinationMap, ScanResult, ZoneStatus};
use serde::Serialize;

/// Label for categories with no configured destination.
pub const UNMAPPED_DESTINATION: &str = "Unmapped";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub zones: usize,
    pub active: usize,
    pub empty: usize,
    pub errors: usize,
    pub pallets: u64,
    pub units: u64,
    /// Active zones per main destination. A zone routed to two destinations
    /// counts toward both.
    pub by_destination: BTreeMap<String, usize>,
}

impl ScanSummary {
    #[must_use]
    pub fn from_results(results: &[ScanResult], destinations: &DestinationMap) -> Self {
        let mut summary = Self {
            zones: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.status {
                ZoneStatus::Empty => summary.empty += 1,
                ZoneStatus::Error => summary.errors += 1,
                ZoneStatus::Active => {
                    summary.active += 1;
                    summary.pallets += u64::from(result.pallet_count);
                    summary.units = summary.units.saturating_add(result.unit_count);

                    let mut routed: Vec<&str> = result
                        .sortation_categories
                        .iter()
                        .map(|category| {
                            destinations
                                .destination_for(category)
                                .unwrap_or(UNMAPPED_DESTINATION)
                        })
                        .collect();
                    routed.sort_unstable();
                    routed.dedup();
                    for destination in routed {
                        *summary
                            .by_destination
                            .entry(destination.to_string())
                            .or_default() += 1;
                    }
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn categories(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn totals_and_destinations() {
        let mut destinations = DestinationMap::default();
        destinations.insert("SC-FAST", "KTW1");
        destinations.insert("SC-SLOW", "KTW1");
        destinations.insert("SC-BULK", "POZ2");

        let results = vec![
            ScanResult::active("A01", 2, 12, categories(&["SC-FAST", "SC-SLOW"])),
            ScanResult::active("A02", 1, 0, categories(&["SC-BULK", "SC-ODD"])),
            ScanResult::active("A03", 3, 5, BTreeSet::new()),
            ScanResult::empty("A04"),
            ScanResult::error("A05", "HTTP 503"),
        ];

        let summary = ScanSummary::from_results(&results, &destinations);

        assert_eq!(
            summary,
            ScanSummary {
                zones: 5,
                active: 3,
                empty: 1,
                errors: 1,
                pallets: 6,
                units: 17,
                by_destination: BTreeMap::from([
                    ("KTW1".to_string(), 1),
                    ("POZ2".to_string(), 1),
                    ("Unmapped".to_string(), 1),
                ]),
            }
        );
    }
}
