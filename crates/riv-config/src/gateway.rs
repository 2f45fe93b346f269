//! Remote `getContainer` endpoint configuration.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "/api/getContainer".to_string()
}

fn default_locale() -> String {
    "pl-PL".to_string()
}

fn default_user_agent() -> String {
    concat!("riv/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Origin of the warehouse application (e.g., `https://wms.example.internal`).
    #[serde(default)]
    pub base_url: String,

    /// Path of the container endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Locale sent in every request body.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Raw `Cookie` header copied from an authenticated browser session.
    #[serde(default)]
    pub cookie: String,

    /// Per-request timeout in seconds. `0` leaves requests unbounded.
    #[serde(default)]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint: default_endpoint(),
            locale: default_locale(),
            cookie: String::new(),
            request_timeout_secs: 0,
            user_agent: default_user_agent(),
        }
    }
}

impl GatewayConfig {
    /// Check if a base URL has been set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Full endpoint URL, joining base and path with exactly one slash.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            self.endpoint.trim().trim_start_matches('/')
        )
    }
}
