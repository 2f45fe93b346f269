//! Batched fan-out over drop zones.
//!
//! Zones are fetched `batch_size` at a time. Every fetch in a batch, including
//! nested pallet descents, settles before the next batch starts, so the number
//! of outstanding requests stays bounded. Each zone converts its own failures
//! into a result; nothing crosses the batch boundary as an error.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{StreamExt, future::join_all, stream};
use riv_config::ScanConfig;
use riv_core::{CddCandidate, Container, DestinationMap, ScanResult};
use riv_gateway::{ContainerSource, FetchOptions};
use serde::Serialize;

use crate::error::ScanError;

/// Runtime knobs, usually built from [`ScanConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub surface_batch_size: usize,
    pub deep_batch_size: usize,
    pub batch_delay: Duration,
    /// Race each zone fetch against this limit; expiry is a zone error.
    pub zone_timeout: Option<Duration>,
    pub pallet_concurrency: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ScanSettings {
    fn from(config: &ScanConfig) -> Self {
        Self {
            surface_batch_size: config.surface_batch_size,
            deep_batch_size: config.deep_batch_size,
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            zone_timeout: (config.zone_timeout_secs > 0)
                .then(|| Duration::from_secs(config.zone_timeout_secs)),
            pallet_concurrency: config.pallet_concurrency,
        }
    }
}

impl ScanSettings {
    #[must_use]
    pub fn batch_size(&self, deep: bool) -> usize {
        let size = if deep {
            self.deep_batch_size
        } else {
            self.surface_batch_size
        };
        size.max(1)
    }
}

/// Everything one scan produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub deep: bool,
    /// One result per requested zone, in request order.
    pub results: Vec<ScanResult>,
    /// Tote-level Clean Decant Dates seen during a deep scan.
    pub cdd_candidates: Vec<CddCandidate>,
}

struct ZoneOutcome {
    result: ScanResult,
    candidates: Vec<CddCandidate>,
}

impl From<ScanResult> for ZoneOutcome {
    fn from(result: ScanResult) -> Self {
        Self {
            result,
            candidates: Vec::new(),
        }
    }
}

struct PalletOutcome {
    units: u64,
    candidates: Vec<CddCandidate>,
}

/// Clears the in-flight flag when the scan future completes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BatchScanner<S> {
    source: S,
    settings: ScanSettings,
    destinations: DestinationMap,
    in_flight: AtomicBool,
}

impl<S: ContainerSource> BatchScanner<S> {
    #[must_use]
    pub fn new(source: S, settings: ScanSettings) -> Self {
        Self {
            source,
            settings,
            destinations: DestinationMap::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Destination lookup used to label CDD candidates.
    #[must_use]
    pub fn with_destinations(mut self, destinations: DestinationMap) -> Self {
        self.destinations = destinations;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// True while a scan is running on this scanner.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Scan `zone_ids` in order. `on_progress(completed, total)` runs after
    /// every batch.
    ///
    /// Surface scans (`deep = false`) stop at pallet level and always report
    /// zero units. Deep scans fetch every pallet to sum its totes' units.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::AlreadyRunning`] if a scan is already in flight on
    /// this scanner. Zone-level failures are reported in the results instead.
    pub async fn scan<F>(
        &self,
        zone_ids: &[String],
        deep: bool,
        mut on_progress: F,
    ) -> Result<ScanReport, ScanError>
    where
        F: FnMut(usize, usize),
    {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(ScanError::AlreadyRunning)?;

        let total = zone_ids.len();
        let batch_size = self.settings.batch_size(deep);
        let mut results = Vec::with_capacity(total);
        let mut cdd_candidates = Vec::new();

        tracing::info!(total, deep, batch_size, "scan started");

        for (index, batch) in zone_ids.chunks(batch_size).enumerate() {
            if index > 0 && !self.settings.batch_delay.is_zero() {
                tokio::time::sleep(self.settings.batch_delay).await;
            }

            let outcomes = join_all(batch.iter().map(|zone_id| self.scan_zone(zone_id, deep))).await;
            for outcome in outcomes {
                results.push(outcome.result);
                cdd_candidates.extend(outcome.candidates);
            }

            on_progress(results.len(), total);
        }

        tracing::info!(
            total,
            candidates = cdd_candidates.len(),
            "scan finished"
        );

        Ok(ScanReport {
            deep,
            results,
            cdd_candidates,
        })
    }

    async fn scan_zone(&self, zone_id: &str, deep: bool) -> ZoneOutcome {
        let fetch = self.source.fetch_container(zone_id, FetchOptions::silent());
        let fetched = match self.settings.zone_timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(fetched) => fetched,
                Err(_) => {
                    tracing::warn!(zone_id, ?limit, "zone fetch timed out");
                    return ScanResult::error(zone_id, format!("timed out after {limit:?}")).into();
                }
            },
            None => fetch.await,
        };

        let zone = match fetched {
            Ok(zone) => zone,
            Err(error) if error.is_empty_zone() => return ScanResult::empty(zone_id).into(),
            Err(error) => {
                tracing::warn!(zone_id, %error, "zone fetch failed");
                return ScanResult::error(zone_id, error.to_string()).into();
            }
        };

        let pallets = zone.children();
        if pallets.is_empty() {
            return ScanResult::empty(zone_id).into();
        }

        let pallet_count = u32::try_from(pallets.len()).unwrap_or(u32::MAX);
        let categories: BTreeSet<String> = pallets
            .iter()
            .flat_map(Container::routed_categories)
            .map(String::from)
            .collect();

        if !deep {
            return ScanResult::active(zone_id, pallet_count, 0, categories).into();
        }

        let descents: Vec<PalletOutcome> = stream::iter(pallets)
            .map(|pallet| self.descend_pallet(zone_id, pallet))
            .buffered(self.settings.pallet_concurrency.max(1))
            .collect()
            .await;

        let mut unit_count = 0u64;
        let mut candidates = Vec::new();
        for descent in descents {
            unit_count = unit_count.saturating_add(descent.units);
            candidates.extend(descent.candidates);
        }

        ZoneOutcome {
            result: ScanResult::active(zone_id, pallet_count, unit_count, categories),
            candidates,
        }
    }

    /// Fetch one pallet's totes. On failure, fall back to the pallet's own
    /// child count so one bad pallet never sinks the zone.
    async fn descend_pallet(&self, zone_id: &str, pallet: &Container) -> PalletOutcome {
        let fallback = || PalletOutcome {
            units: pallet.unit_hint().unwrap_or(0),
            candidates: Vec::new(),
        };

        if pallet.container_id.trim().is_empty() {
            return fallback();
        }

        let full = match self
            .source
            .fetch_container(&pallet.container_id, FetchOptions::silent())
            .await
        {
            Ok(full) => full,
            Err(error) => {
                tracing::warn!(
                    zone_id,
                    pallet_id = %pallet.container_id,
                    %error,
                    fallback_units = ?pallet.unit_hint(),
                    "pallet descent failed; using pallet child count"
                );
                return fallback();
            }
        };

        let totes = full.children();
        let units = totes
            .iter()
            .filter_map(Container::unit_hint)
            .fold(0u64, u64::saturating_add);
        let pallet_category = pallet.primary_category().or_else(|| full.primary_category());

        let candidates = totes
            .iter()
            .filter_map(|tote| {
                let timestamp = tote.clean_decant_date()?;
                let sortation_category = tote
                    .primary_category()
                    .or(pallet_category)
                    .map(String::from);
                let destination = sortation_category
                    .as_deref()
                    .and_then(|c| self.destinations.destination_for(c))
                    .map(String::from);
                Some(CddCandidate {
                    timestamp: timestamp.to_string(),
                    tote_id: tote.container_id.clone(),
                    pallet_id: pallet.container_id.clone(),
                    zone_id: zone_id.to_string(),
                    units: tote.unit_hint().unwrap_or(0),
                    sortation_category,
                    destination,
                })
            })
            .collect();

        PalletOutcome { units, candidates }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use pretty_assertions::assert_eq;
    use riv_core::ZoneStatus;
    use riv_gateway::{GatewayError, MemorySource};
    use serde_json::json;

    use super::*;

    fn container(value: serde_json::Value) -> Container {
        serde_json::from_value(value).unwrap()
    }

    fn ids(zones: &[&str]) -> Vec<String> {
        zones.iter().map(ToString::to_string).collect()
    }

    fn settings() -> ScanSettings {
        ScanSettings {
            surface_batch_size: 5,
            deep_batch_size: 2,
            batch_delay: Duration::ZERO,
            zone_timeout: None,
            pallet_concurrency: 4,
        }
    }

    fn two_pallet_zone() -> MemorySource {
        MemorySource::new()
            .with_container(
                "DZ-Z",
                container(json!({
                    "containerId": "DZ-Z",
                    "childContainers": [
                        {"containerId": "PA", "numOfChildContainers": 2, "sortationCategories": ["SC-FAST"]},
                        {"containerId": "PB", "numOfChildContainers": 7, "sortationCategory": "SC-BULK"}
                    ]
                })),
            )
            .with_container(
                "PA",
                container(json!({
                    "containerId": "PA",
                    "childContainers": [
                        {"containerId": "T1", "numOfChildContainers": 3},
                        {"containerId": "T2", "numOfChildContainers": 4}
                    ]
                })),
            )
            .with_container(
                "PB",
                container(json!({
                    "containerId": "PB",
                    "childContainers": [{"containerId": "T3", "numOfChildContainers": 5}]
                })),
            )
    }

    #[tokio::test]
    async fn rejected_zone_is_empty() {
        let scanner = BatchScanner::new(MemorySource::new().with_status("DZ-Z", 400), settings());

        let report = scanner.scan(&ids(&["DZ-Z"]), false, |_, _| {}).await.unwrap();

        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.zone_id, "DZ-Z");
        assert_eq!(result.status, ZoneStatus::Empty);
        assert_eq!(result.sortation_category, "Empty");
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn other_failures_are_errors_not_empty() {
        let source = MemorySource::new()
            .with_status("DZ-500", 500)
            .with_network_error("DZ-NET");
        let scanner = BatchScanner::new(source, settings());

        let report = scanner
            .scan(&ids(&["DZ-500", "DZ-NET"]), false, |_, _| {})
            .await
            .unwrap();

        for result in &report.results {
            assert_eq!(result.status, ZoneStatus::Error, "{}", result.zone_id);
            assert_eq!(result.sortation_category, "Error");
            assert!(result.error.is_some());
        }
    }

    #[tokio::test]
    async fn surface_scan_never_counts_units() {
        let scanner = BatchScanner::new(two_pallet_zone(), settings());

        let report = scanner.scan(&ids(&["DZ-Z"]), false, |_, _| {}).await.unwrap();

        let result = &report.results[0];
        assert_eq!(result.status, ZoneStatus::Active);
        assert_eq!(result.pallet_count, 2);
        assert_eq!(result.unit_count, 0);
        assert_eq!(result.sortation_category, "SC-BULK, SC-FAST");
        // Surface scans stop at the zone.
        assert_eq!(scanner.source().calls(), vec!["DZ-Z".to_string()]);
        assert!(report.cdd_candidates.is_empty());
    }

    #[tokio::test]
    async fn deep_scan_sums_tote_units() {
        let scanner = BatchScanner::new(two_pallet_zone(), settings());

        let report = scanner.scan(&ids(&["DZ-Z"]), true, |_, _| {}).await.unwrap();

        assert_eq!(report.results[0].unit_count, 12);
        assert_eq!(scanner.source().call_count("PA"), 1);
        assert_eq!(scanner.source().call_count("PB"), 1);
    }

    #[tokio::test]
    async fn failed_pallet_falls_back_to_its_child_count() {
        let source = two_pallet_zone().with_status("PB", 503);
        let scanner = BatchScanner::new(source, settings());

        let report = scanner.scan(&ids(&["DZ-Z"]), true, |_, _| {}).await.unwrap();

        assert_eq!(report.results[0].status, ZoneStatus::Active);
        assert_eq!(report.results[0].unit_count, 3 + 4 + 7);
    }

    #[tokio::test]
    async fn zones_without_children_are_empty() {
        let source = MemorySource::new()
            .with_container(
                "DZ-CDPL-A01",
                container(json!({"containerId": "DZ-CDPL-A01", "childContainers": []})),
            )
            .with_container("DZ-CDPL-A02", container(json!({"containerId": "DZ-CDPL-A02"})));
        let scanner = BatchScanner::new(source, settings());

        let report = scanner
            .scan(&ids(&["DZ-CDPL-A01", "DZ-CDPL-A02"]), false, |_, _| {})
            .await
            .unwrap();

        let summary: Vec<_> = report
            .results
            .iter()
            .map(|r| (r.zone_id.as_str(), r.status, r.unit_count))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("DZ-CDPL-A01", ZoneStatus::Empty, 0),
                ("DZ-CDPL-A02", ZoneStatus::Empty, 0),
            ]
        );
    }

    #[tokio::test]
    async fn deep_scan_of_single_pallet_zone() {
        let source = MemorySource::new()
            .with_container(
                "DZ-CDPL-A03",
                container(json!({
                    "containerId": "DZ-CDPL-A03",
                    "childContainers": [{"containerId": "P-9", "numOfChildContainers": 2}]
                })),
            )
            .with_container(
                "P-9",
                container(json!({
                    "containerId": "P-9",
                    "childContainers": [
                        {"containerId": "T-a", "numOfChildContainers": 10},
                        {"containerId": "T-b", "numOfChildContainers": 15}
                    ]
                })),
            );
        let scanner = BatchScanner::new(source, settings());

        let report = scanner
            .scan(&ids(&["DZ-CDPL-A03"]), true, |_, _| {})
            .await
            .unwrap();

        let result = &report.results[0];
        assert_eq!(result.status, ZoneStatus::Active);
        assert_eq!(result.pallet_count, 1);
        assert_eq!(result.unit_count, 25);
        assert_eq!(result.sortation_category, "N/A");
    }

    #[tokio::test]
    async fn deep_scan_collects_clean_decant_dates() {
        let source = MemorySource::new()
            .with_container(
                "DZ-Z",
                container(json!({
                    "containerId": "DZ-Z",
                    "childContainers": [{"containerId": "P-1", "sortationCategories": ["SC-FAST"]}]
                })),
            )
            .with_container(
                "P-1",
                container(json!({
                    "containerId": "P-1",
                    "childContainers": [
                        {
                            "containerId": "T-1",
                            "numOfChildContainers": 6,
                            "containerProperties": {"cleanDecantDate": "07-05-2025 02:07"}
                        },
                        {
                            "containerId": "T-2",
                            "sortationCategories": ["SC-OWN"],
                            "containerProperties": {"cleanDecantDate": "08-05-2025 10:00"}
                        },
                        {"containerId": "T-3", "containerProperties": {"cleanDecantDate": "  "}}
                    ]
                })),
            );
        let mut destinations = DestinationMap::default();
        destinations.insert("SC-FAST", "KTW1");
        let scanner = BatchScanner::new(source, settings()).with_destinations(destinations);

        let report = scanner.scan(&ids(&["DZ-Z"]), true, |_, _| {}).await.unwrap();

        assert_eq!(
            report.cdd_candidates,
            vec![
                CddCandidate {
                    timestamp: "07-05-2025 02:07".into(),
                    tote_id: "T-1".into(),
                    pallet_id: "P-1".into(),
                    zone_id: "DZ-Z".into(),
                    units: 6,
                    sortation_category: Some("SC-FAST".into()),
                    destination: Some("KTW1".into()),
                },
                CddCandidate {
                    timestamp: "08-05-2025 10:00".into(),
                    tote_id: "T-2".into(),
                    pallet_id: "P-1".into(),
                    zone_id: "DZ-Z".into(),
                    units: 0,
                    sortation_category: Some("SC-OWN".into()),
                    destination: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn batches_bound_concurrency_and_report_progress() {
        let zones: Vec<String> = (1..=7).map(|n| format!("DZ-{n:02}")).collect();
        let source = zones.iter().fold(MemorySource::new(), |source, id| {
            source.with_container(id.clone(), container(json!({"containerId": id})))
        });
        let scanner = BatchScanner::new(
            source,
            ScanSettings {
                surface_batch_size: 3,
                ..settings()
            },
        );

        let mut progress = Vec::new();
        let report = scanner
            .scan(&zones, false, |done, total| progress.push((done, total)))
            .await
            .unwrap();

        assert_eq!(progress, vec![(3, 7), (6, 7), (7, 7)]);
        assert_eq!(scanner.source().peak_in_flight(), 3);
        let order: Vec<_> = report.results.iter().map(|r| r.zone_id.clone()).collect();
        assert_eq!(order, zones);
    }

    fn flat_zones(count: usize) -> (Vec<String>, MemorySource) {
        let zones: Vec<String> = (1..=count).map(|n| format!("DZ-{n:02}")).collect();
        let source = zones.iter().fold(MemorySource::new(), |source, id| {
            source.with_container(id.clone(), container(json!({"containerId": id})))
        });
        (zones, source)
    }

    #[tokio::test(start_paused = true)]
    async fn batches_are_separated_by_the_delay() {
        let delay = Duration::from_millis(250);
        let (zones, source) = flat_zones(3);
        let scanner = BatchScanner::new(
            source,
            ScanSettings {
                surface_batch_size: 1,
                batch_delay: delay,
                ..settings()
            },
        );

        let started = tokio::time::Instant::now();
        scanner.scan(&zones, false, |_, _| {}).await.unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
        assert!(elapsed < delay * 3, "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn single_batch_does_not_wait() {
        let delay = Duration::from_millis(250);
        let (zones, source) = flat_zones(3);
        let scanner = BatchScanner::new(
            source,
            ScanSettings {
                surface_batch_size: 3,
                batch_delay: delay,
                ..settings()
            },
        );

        let started = tokio::time::Instant::now();
        scanner.scan(&zones, false, |_, _| {}).await.unwrap();

        assert!(started.elapsed() < delay);
    }

    #[tokio::test]
    async fn deep_batches_finish_their_pallets_before_the_next_batch() {
        let zones: Vec<String> = (1..=4).map(|n| format!("DZ-{n:02}")).collect();
        let mut source = MemorySource::new();
        for zone in &zones {
            let pallets: Vec<String> = (1..=3).map(|p| format!("{zone}-P{p}")).collect();
            let children: Vec<_> = pallets
                .iter()
                .map(|id| json!({"containerId": id, "numOfChildContainers": 1}))
                .collect();
            source = source.with_container(
                zone.clone(),
                container(json!({"containerId": zone, "childContainers": children})),
            );
            for pallet in pallets {
                let tote = json!({"containerId": format!("{pallet}-T"), "numOfChildContainers": 2});
                source = source.with_container(
                    pallet.clone(),
                    container(json!({"containerId": pallet, "childContainers": [tote]})),
                );
            }
        }
        let scanner = BatchScanner::new(
            source,
            ScanSettings {
                deep_batch_size: 2,
                pallet_concurrency: 2,
                ..settings()
            },
        );

        let report = scanner.scan(&zones, true, |_, _| {}).await.unwrap();

        assert!(report.results.iter().all(|r| r.unit_count == 6));
        assert!(scanner.source().peak_in_flight() <= 2 * 2);

        let calls = scanner.source().calls();
        let position = |id: &str| calls.iter().position(|call| call == id).unwrap();
        let last_of_first_batch = calls
            .iter()
            .rposition(|call| call.starts_with("DZ-01") || call.starts_with("DZ-02"))
            .unwrap();
        assert!(position("DZ-03") > last_of_first_batch);
        assert!(position("DZ-04") > last_of_first_batch);
        assert_eq!(calls.len(), 4 + 4 * 3);
    }

    #[tokio::test]
    async fn empty_worklist_finishes_immediately() {
        let scanner = BatchScanner::new(MemorySource::new(), settings());
        let mut calls = 0;

        let report = scanner.scan(&[], true, |_, _| calls += 1).await.unwrap();

        assert!(report.results.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn second_scan_is_refused_while_first_runs() {
        let scanner = BatchScanner::new(two_pallet_zone(), settings());
        let zones = ids(&["DZ-Z"]);

        let (first, second) = tokio::join!(
            scanner.scan(&zones, true, |_, _| {}),
            scanner.scan(&zones, true, |_, _| {}),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(ScanError::AlreadyRunning)));
        assert!(!scanner.is_scanning());
        assert!(scanner.scan(&zones, false, |_, _| {}).await.is_ok());
    }

    struct Stalled;

    impl ContainerSource for Stalled {
        fn fetch_container(
            &self,
            _container_id: &str,
            _opts: FetchOptions,
        ) -> impl Future<Output = Result<Container, GatewayError>> + Send {
            std::future::pending()
        }
    }

    #[tokio::test]
    async fn stalled_zone_times_out_as_error() {
        let scanner = BatchScanner::new(
            Stalled,
            ScanSettings {
                zone_timeout: Some(Duration::from_millis(20)),
                ..settings()
            },
        );

        let report = scanner.scan(&ids(&["DZ-Z"]), false, |_, _| {}).await.unwrap();

        assert_eq!(report.results[0].status, ZoneStatus::Error);
        assert!(report.results[0].error.as_deref().unwrap().contains("timed out"));
    }

    #[test]
    fn settings_follow_config() {
        let settings = ScanSettings::from(&ScanConfig {
            zone_timeout_secs: 0,
            ..ScanConfig::default()
        });
        assert_eq!(settings.batch_size(false), 5);
        assert_eq!(settings.batch_size(true), 2);
        assert_eq!(settings.batch_delay, Duration::from_millis(300));
        assert_eq!(settings.zone_timeout, None);
    }
}
