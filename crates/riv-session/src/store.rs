use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{Duration, Utc};
use riv_config::SessionConfig;
use riv_core::Session;

use crate::error::SessionError;

/// Process-wide session holder. Cheap to read; every write is persisted.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    max_age: Duration,
    endpoint: String,
    state: RwLock<Session>,
}

impl SessionStore {
    /// Store persisted at `path`, starting empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            path: Some(path.into()),
            max_age,
            endpoint: "/api/getContainer".to_string(),
            state: RwLock::new(Session::default()),
        }
    }

    /// Store that never touches disk.
    #[must_use]
    pub fn in_memory(max_age: Duration) -> Self {
        Self {
            path: None,
            max_age,
            endpoint: "/api/getContainer".to_string(),
            state: RwLock::new(Session::default()),
        }
    }

    /// Build from configuration. Does not load; call [`Self::load`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHomeDir`] if no path is configured and the
    /// default location cannot be resolved, or
    /// [`SessionError::MaxAgeOutOfRange`] if the max age overflows a duration.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let hours = config.max_age_hours;
        let max_age = i64::try_from(hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(SessionError::MaxAgeOutOfRange { hours })?;
        let path = config.resolved_path().ok_or(SessionError::NoHomeDir)?;
        Ok(Self::new(path, max_age))
    }

    /// Endpoint path that [`Self::observe`] treats as a gateway request.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True when the held session is complete, fresh and sentinel-free.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.get().is_valid_at(Utc::now(), self.max_age)
    }

    /// Replace the session, stamp `lastCaptured`, and persist.
    ///
    /// Persistence failures are logged, never returned.
    pub fn update(
        &self,
        warehouse_id: impl Into<String>,
        associate: impl Into<String>,
        session_id: Option<String>,
    ) {
        let session = Session {
            warehouse_id: Some(warehouse_id.into()),
            associate: Some(associate.into()),
            session_id,
            last_captured: Some(Utc::now()),
        };
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        tracing::debug!(
            warehouse_id = session.warehouse_id.as_deref(),
            associate = session.associate.as_deref(),
            "session updated"
        );

        if let Err(error) = self.persist(&session) {
            tracing::warn!(%error, "failed to persist session; keeping it in memory");
        }
    }

    /// Restore from disk. Returns whether a valid session was restored.
    ///
    /// Unreadable, stale, incomplete or sentinel sessions are discarded and
    /// the file is deleted.
    pub fn load(&self) -> bool {
        let Some(path) = self.path.as_deref() else {
            return false;
        };
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return false,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to read session file");
                return false;
            }
        };

        let session = match serde_json::from_str::<Session>(&raw) {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "discarding unreadable session file");
                self.remove_file();
                return false;
            }
        };

        if !session.is_valid_at(Utc::now(), self.max_age) {
            tracing::info!(
                path = %path.display(),
                sentinel = session.has_sentinel(),
                "discarding stale or placeholder session"
            );
            self.remove_file();
            return false;
        }

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session;
        true
    }

    /// Reset to empty and delete the persisted copy.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the session file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn remove_file(&self) {
        if let Some(path) = self.path.as_deref()
            && let Err(error) = fs::remove_file(path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %path.display(), %error, "failed to delete session file");
        }
    }

    fn persist(&self, session: &Session) -> Result<(), SessionError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let io_err = |source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(path, json).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("failed to chmod 0600 {}: {error}", path.display());
            }
        }

        Ok(())
    }
}
