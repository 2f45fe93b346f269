//! # riv-gateway
//!
//! The only interface to the remote warehouse system: `POST /api/getContainer`.
//!
//! - [`ContainerGateway`] issues one request per container ID, reading the
//!   warehouse ID and associate from a shared [`SessionStore`] at call time.
//! - [`ContainerSource`] abstracts the fetch so scan logic can run against
//!   the gateway or an in-memory [`MemorySource`].
//! - [`bootstrap_session`] probes the endpoint with candidate identifiers
//!   when no session has been captured passively.
//!
//! Failures map to [`GatewayError::Network`], [`GatewayError::Http`] or
//! [`GatewayError::Parse`]. Nothing here retries.

mod bootstrap;
mod error;
mod http;
pub mod memory;
mod request;
mod source;

pub use bootstrap::bootstrap_session;
pub use error::GatewayError;
pub use memory::MemorySource;
pub use request::ContainerRequest;
pub use source::{ContainerSource, FetchOptions};

use std::sync::Arc;
use std::time::Duration;

use riv_config::GatewayConfig;
use riv_core::Container;
use riv_session::SessionStore;

use crate::http::{check_response, parse_container};

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the container endpoint.
#[derive(Debug, Clone)]
pub struct ContainerGateway {
    http: reqwest::Client,
    url: String,
    locale: String,
    session: Arc<SessionStore>,
}

impl ContainerGateway {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidConfig`] if the base URL is missing, the
    /// cookie is not a valid header value, or the HTTP client fails to build.
    pub fn new(config: &GatewayConfig, session: Arc<SessionStore>) -> Result<Self, GatewayError> {
        if !config.is_configured() {
            return Err(GatewayError::InvalidConfig(
                "gateway.base_url is not set".into(),
            ));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        if !config.cookie.trim().is_empty() {
            let value = reqwest::header::HeaderValue::from_str(config.cookie.trim())
                .map_err(|e| GatewayError::InvalidConfig(format!("gateway.cookie: {e}")))?;
            headers.insert(reqwest::header::COOKIE, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.endpoint_url(),
            locale: config.locale.clone(),
            session,
        })
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Fetch a container and its immediate children using the stored session.
    ///
    /// Missing identifiers fall back to the sentinel placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport failure, a non-200 status, or an
    /// unparseable body.
    pub async fn fetch(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> Result<Container, GatewayError> {
        let session = self.session.get();
        let (warehouse_id, associate) = session.request_identity();
        self.fetch_as(container_id, warehouse_id, associate, opts)
            .await
    }

    /// Fetch a container with explicit identifiers, bypassing the store.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn fetch_as(
        &self,
        container_id: &str,
        warehouse_id: &str,
        associate: &str,
        opts: FetchOptions,
    ) -> Result<Container, GatewayError> {
        let body = ContainerRequest::search(container_id, warehouse_id, associate, &self.locale);
        if opts.silent {
            tracing::trace!(container_id, warehouse_id, "getContainer");
        } else {
            tracing::debug!(container_id, warehouse_id, url = %self.url, "getContainer");
        }

        let result = self.round_trip(&body).await;
        match &result {
            Ok(container) if !opts.silent => tracing::debug!(
                container_id,
                children = container.children().len(),
                "getContainer ok"
            ),
            Err(error) if !opts.silent => {
                tracing::debug!(container_id, %error, "getContainer failed");
            }
            _ => {}
        }
        result
    }

    async fn round_trip(&self, body: &ContainerRequest<'_>) -> Result<Container, GatewayError> {
        let resp = self.http.post(&self.url).json(body).send().await?;
        let text = check_response(resp).await?.text().await?;
        parse_container(&text)
    }
}

impl ContainerSource for ContainerGateway {
    async fn fetch_container(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> Result<Container, GatewayError> {
        self.fetch(container_id, opts).await
    }
}
