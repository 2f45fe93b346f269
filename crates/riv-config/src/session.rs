//! Session persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Largest accepted `max_age_hours` (ten years).
pub const MAX_SESSION_AGE_HOURS: u64 = 10 * 365 * 24;

const fn default_max_age_hours() -> u64 {
    24
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session file location. Empty means `~/.riv/session.json`.
    #[serde(default)]
    pub path: String,

    /// Sessions captured longer ago than this are discarded on load.
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            max_age_hours: default_max_age_hours(),
        }
    }
}

impl SessionConfig {
    /// Resolved session file path, or `None` if no home directory is known.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if self.path.trim().is_empty() {
            dirs::home_dir().map(|home| home.join(".riv").join("session.json"))
        } else {
            Some(PathBuf::from(self.path.trim()))
        }
    }
}
