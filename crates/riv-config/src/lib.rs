//! # riv-config
//!
//! Layered configuration loading for riv using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RIV_*` prefix, `__` as separator)
//! 2. An explicit `--config` file, when given
//! 3. Project-level `.riv/config.toml`
//! 4. User-level `~/.config/riv/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RIV_GATEWAY__BASE_URL` -> `gateway.base_url`,
//! `RIV_SCAN__DEEP_BATCH_SIZE` -> `scan.deep_batch_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use riv_config::RivConfig;
//!
//! let config = RivConfig::load().expect("config");
//! if config.gateway.is_configured() {
//!     println!("endpoint: {}", config.gateway.endpoint_url());
//! }
//! ```

mod error;
mod gateway;
mod scan;
mod session;

pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use scan::ScanConfig;
pub use session::{MAX_SESSION_AGE_HOURS, SessionConfig};

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use riv_core::DestinationMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RivConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub session: SessionConfig,
    /// Sortation category → main destination, for display grouping only.
    #[serde(default)]
    pub destinations: DestinationMap,
}

impl RivConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; the binary loads it before calling in here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `extra_file` above the standard TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_from(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain with an optional explicit file.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_with(extra_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".riv/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra_file {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("RIV_").split("__"))
    }

    /// Reject values that would stall or misconfigure a scan.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scan.surface_batch_size", self.scan.surface_batch_size),
            ("scan.deep_batch_size", self.scan.deep_batch_size),
            ("scan.pallet_concurrency", self.scan.pallet_concurrency),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if self.session.max_age_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.max_age_hours".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session.max_age_hours > MAX_SESSION_AGE_HOURS {
            return Err(ConfigError::InvalidValue {
                field: "session.max_age_hours".to_string(),
                reason: format!("must be at most {MAX_SESSION_AGE_HOURS}"),
            });
        }
        Ok(())
    }

    /// Fail unless the gateway has a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `gateway` section.
    pub fn require_gateway(&self) -> Result<&GatewayConfig, ConfigError> {
        if self.gateway.is_configured() {
            Ok(&self.gateway)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gateway".to_string(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("riv").join("config.toml"))
    }
}
