//! Batch scanner tuning.
//!
//! None of these values is a contract with the remote service; they only
//! bound how hard a scan leans on it.

use serde::{Deserialize, Serialize};

const fn default_surface_batch_size() -> usize {
    5
}

const fn default_deep_batch_size() -> usize {
    2
}

const fn default_batch_delay_ms() -> u64 {
    300
}

const fn default_zone_timeout_secs() -> u64 {
    10
}

const fn default_pallet_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Zones fetched concurrently per batch in a surface scan.
    #[serde(default = "default_surface_batch_size")]
    pub surface_batch_size: usize,

    /// Zones fetched concurrently per batch in a deep scan.
    #[serde(default = "default_deep_batch_size")]
    pub deep_batch_size: usize,

    /// Pause between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Upper bound on a single zone fetch. `0` disables the race.
    #[serde(default = "default_zone_timeout_secs")]
    pub zone_timeout_secs: u64,

    /// Pallet descents in flight per zone during a deep scan.
    #[serde(default = "default_pallet_concurrency")]
    pub pallet_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            surface_batch_size: default_surface_batch_size(),
            deep_batch_size: default_deep_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            zone_timeout_secs: default_zone_timeout_secs(),
            pallet_concurrency: default_pallet_concurrency(),
        }
    }
}
