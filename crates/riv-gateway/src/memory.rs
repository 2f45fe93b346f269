//! In-memory container source.
//!
//! Serves a fixed container tree without a network. Used for offline replay
//! of captured responses (`riv scan --fixture`) and by tests, which also read
//! its call log and peak concurrency.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicUsize, Ordering};

use riv_core::Container;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::source::{ContainerSource, FetchOptions};

/// What the source answers for one container ID.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemoryEntry {
    /// Respond with this HTTP status (e.g. 400 for an empty zone).
    #[serde(rename_all = "camelCase")]
    Status {
        http_status: u16,
        #[serde(default)]
        message: String,
    },
    /// Fail as if the transport dropped.
    #[serde(rename_all = "camelCase")]
    Unreachable { network_error: String },
    /// Respond with this container.
    Container(Container),
}

/// Container tree keyed by container ID. Unknown IDs answer `400`.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, MemoryEntry>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture: a JSON object mapping container IDs to entries.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Parse`] if the file cannot be read or decoded.
    pub fn from_fixture_file(path: &Path) -> Result<Self, GatewayError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_fixture_json(&raw)
    }

    /// # Errors
    ///
    /// Returns [`GatewayError::Parse`] if the JSON is not an object of entries.
    pub fn from_fixture_json(json: &str) -> Result<Self, GatewayError> {
        let entries: HashMap<String, MemoryEntry> =
            serde_json::from_str(json).map_err(|e| GatewayError::Parse(e.to_string()))?;
        Ok(Self {
            entries,
            ..Self::default()
        })
    }

    /// Answer `id` with `container`.
    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>, container: Container) -> Self {
        self.entries
            .insert(id.into(), MemoryEntry::Container(container));
        self
    }

    /// Answer `id` with an HTTP error status.
    #[must_use]
    pub fn with_status(mut self, id: impl Into<String>, status: u16) -> Self {
        self.entries.insert(
            id.into(),
            MemoryEntry::Status {
                http_status: status,
                message: String::new(),
            },
        );
        self
    }

    /// Answer `id` with a transport failure.
    #[must_use]
    pub fn with_network_error(mut self, id: impl Into<String>) -> Self {
        self.entries.insert(
            id.into(),
            MemoryEntry::Unreachable {
                network_error: "connection reset".into(),
            },
        );
        self
    }

    /// Container IDs requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times `id` was requested.
    #[must_use]
    pub fn call_count(&self, id: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.as_str() == id)
            .count()
    }

    /// Highest number of fetches that were in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn answer(&self, container_id: &str) -> Result<Container, GatewayError> {
        match self.entries.get(container_id) {
            Some(MemoryEntry::Container(container)) => Ok(container.clone()),
            Some(MemoryEntry::Status {
                http_status,
                message,
            }) => Err(GatewayError::Http {
                status: *http_status,
                message: message.clone(),
            }),
            Some(MemoryEntry::Unreachable { network_error }) => {
                Err(GatewayError::Network(network_error.clone()))
            }
            None => Err(GatewayError::Http {
                status: 400,
                message: format!("unknown container {container_id}"),
            }),
        }
    }
}

impl ContainerSource for MemorySource {
    async fn fetch_container(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> Result<Container, GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(container_id.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        // Let sibling fetches in the same batch start before this one settles.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if !opts.silent {
            tracing::debug!(container_id, "memory source fetch");
        }
        self.answer(container_id)
    }
}
