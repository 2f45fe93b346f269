use std::sync::Arc;

use anyhow::Context;
use riv_config::RivConfig;
use riv_gateway::ContainerGateway;
use riv_scan::ScanSettings;
use riv_session::SessionStore;

/// Shared resources initialized once at startup.
pub struct AppContext {
    pub config: RivConfig,
    pub session: Arc<SessionStore>,
}

impl AppContext {
    /// Open the session store and restore any persisted session.
    pub fn init(config: RivConfig) -> anyhow::Result<Self> {
        let session = SessionStore::from_config(&config.session)
            .context("failed to resolve session file location")?
            .with_endpoint(config.gateway.endpoint.clone());
        let restored = session.load();
        tracing::debug!(restored, path = ?session.path(), "session store ready");

        Ok(Self {
            config,
            session: Arc::new(session),
        })
    }

    /// Build an HTTP gateway bound to the shared session store.
    pub fn gateway(&self) -> anyhow::Result<ContainerGateway> {
        let gateway = self.config.require_gateway().context(
            "gateway.base_url is not set (use RIV_GATEWAY__BASE_URL or .riv/config.toml)",
        )?;
        ContainerGateway::new(gateway, Arc::clone(&self.session))
            .context("failed to build gateway client")
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings::from(&self.config.scan)
    }
}
