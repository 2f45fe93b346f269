//! Passive capture of identifiers from requests the host application makes.
//!
//! The host integration layer calls [`SessionStore::observe`] after each
//! outgoing request it proxies. The store never intercepts traffic itself.

use riv_core::session::{SENTINEL_ASSOCIATE, SENTINEL_WAREHOUSE_ID};
use serde_json::Value;

use crate::store::SessionStore;

/// Identifiers lifted from a legitimate `getContainer` request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedIdentity {
    pub warehouse_id: String,
    pub associate: String,
    pub session_id: Option<String>,
}

impl CapturedIdentity {
    /// Extract identifiers from a JSON request body.
    ///
    /// Returns `None` if the body is not a JSON object, either identifier is
    /// missing or blank, or either equals its sentinel placeholder.
    #[must_use]
    pub fn from_request_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let object = value.as_object()?;
        let field = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let warehouse_id = field("warehouseId")?;
        let associate = field("associate")?;
        if warehouse_id == SENTINEL_WAREHOUSE_ID || associate == SENTINEL_ASSOCIATE {
            return None;
        }

        Some(Self {
            warehouse_id,
            associate,
            session_id: field("sessionId"),
        })
    }
}

impl SessionStore {
    /// Feed an observed outgoing request into the store.
    ///
    /// Only requests whose URL path ends with the gateway endpoint are
    /// considered. Returns whether the session was updated.
    pub fn observe(&self, url: &str, body: &str) -> bool {
        if !targets_endpoint(url, self.endpoint()) {
            return false;
        }
        let Some(identity) = CapturedIdentity::from_request_body(body) else {
            tracing::trace!(url, "observed request carried no usable identity");
            return false;
        };
        self.update(identity.warehouse_id, identity.associate, identity.session_id);
        true
    }
}

fn targets_endpoint(url: &str, endpoint: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let endpoint = endpoint.trim_end_matches('/');
    !endpoint.is_empty() && path.trim_end_matches('/').ends_with(endpoint)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    const BODY: &str = r#"{
        "containerId": "DZ-CDPL-A01",
        "warehouseId": "KTW1",
        "associate": "jdoe",
        "includeChildren": true,
        "mode": "SEARCH",
        "locale": "pl-PL",
        "movingContainers": []
    }"#;

    #[test]
    fn extracts_identity_from_body() {
        let identity = CapturedIdentity::from_request_body(BODY).unwrap();
        assert_eq!(identity.warehouse_id, "KTW1");
        assert_eq!(identity.associate, "jdoe");
        assert!(identity.session_id.is_none());
    }

    #[test]
    fn sentinel_bodies_are_ignored() {
        let body = r#"{"warehouseId":"CDPL1","associate":"jdoe"}"#;
        assert!(CapturedIdentity::from_request_body(body).is_none());
        let body = r#"{"warehouseId":"KTW1","associate":"System"}"#;
        assert!(CapturedIdentity::from_request_body(body).is_none());
    }

    #[test]
    fn incomplete_or_invalid_bodies_are_ignored() {
        assert!(CapturedIdentity::from_request_body(r#"{"warehouseId":"KTW1"}"#).is_none());
        assert!(CapturedIdentity::from_request_body(r#"{"warehouseId":"KTW1","associate":" "}"#).is_none());
        assert!(CapturedIdentity::from_request_body("[]").is_none());
        assert!(CapturedIdentity::from_request_body("not json").is_none());
    }

    #[test]
    fn observe_updates_store_for_gateway_requests() {
        let store = SessionStore::in_memory(Duration::hours(24));
        assert!(store.observe("https://wms.example/api/getContainer?x=1", BODY));
        assert_eq!(store.get().associate.as_deref(), Some("jdoe"));
        assert!(store.is_valid());
    }

    #[test]
    fn observe_ignores_other_endpoints() {
        let store = SessionStore::in_memory(Duration::hours(24));
        assert!(!store.observe("https://wms.example/api/getUser", BODY));
        assert!(store.get().associate.is_none());
    }

    #[test]
    fn observe_respects_custom_endpoint() {
        let store = SessionStore::in_memory(Duration::hours(24)).with_endpoint("/v2/containers");
        assert!(store.observe("https://wms.example/v2/containers/", BODY));
        assert!(!store.observe("https://wms.example/api/getContainer", BODY));
    }
}
