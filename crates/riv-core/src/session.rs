//! Operator session identity required by the `getContainer` API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder warehouse ID sent when no real one has been captured.
pub const SENTINEL_WAREHOUSE_ID: &str = "CDPL1";

/// Placeholder associate sent when no real one has been captured.
pub const SENTINEL_ASSOCIATE: &str = "System";

/// Logical identifiers the API requires on top of the browser's cookie auth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub warehouse_id: Option<String>,
    pub associate: Option<String>,
    pub session_id: Option<String>,
    pub last_captured: Option<DateTime<Utc>>,
}

impl Session {
    /// True when either identifier is a sentinel placeholder, which means it
    /// was never actually captured.
    #[must_use]
    pub fn has_sentinel(&self) -> bool {
        self.warehouse_id.as_deref() == Some(SENTINEL_WAREHOUSE_ID)
            || self.associate.as_deref() == Some(SENTINEL_ASSOCIATE)
    }

    /// Both identifiers present and non-blank.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.warehouse_id) && filled(&self.associate)
    }

    /// `lastCaptured` is set and no more than `max_age` before `now`.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.last_captured
            .is_some_and(|captured| now.signed_duration_since(captured) <= max_age)
    }

    /// A session is usable when it is fresh, complete, and carries no sentinel.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.has_identity() && !self.has_sentinel() && self.is_fresh_at(now, max_age)
    }

    /// Identifiers to put on a request, falling back to the sentinels.
    #[must_use]
    pub fn request_identity(&self) -> (&str, &str) {
        (
            self.warehouse_id.as_deref().unwrap_or(SENTINEL_WAREHOUSE_ID),
            self.associate.as_deref().unwrap_or(SENTINEL_ASSOCIATE),
        )
    }
}
