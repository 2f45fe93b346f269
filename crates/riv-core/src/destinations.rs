//! Sortation category → main destination lookup.
//!
//! Used only to group results for display; the scan itself never consults it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationMap(BTreeMap<String, String>);

impl DestinationMap {
    #[must_use]
    pub const fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    /// Parse a user-edited JSON object (`{"CATEGORY": "DEST", ...}`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDestinationMap`] if the blob is not a JSON
    /// object with string values.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Destination for a category. Lookup ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn destination_for(&self, category: &str) -> Option<&str> {
        let category = category.trim();
        self.0.get(category).map(String::as_str).or_else(|| {
            self.0
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(category))
                .map(|(_, dest)| dest.as_str())
        })
    }

    pub fn insert(&mut self, category: impl Into<String>, destination: impl Into<String>) {
        self.0.insert(category.into(), destination.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_blob() {
        let map = DestinationMap::from_json(r#"{"SC-FAST":"KTW3","SC-BULK":"WRO5"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.destination_for("SC-FAST"), Some("KTW3"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let mut map = DestinationMap::default();
        map.insert("SC-Fast", "KTW3");
        assert_eq!(map.destination_for(" sc-fast "), Some("KTW3"));
        assert_eq!(map.destination_for("unknown"), None);
    }

    #[test]
    fn rejects_non_object_blob() {
        assert!(DestinationMap::from_json("[1,2]").is_err());
        assert!(DestinationMap::from_json(r#"{"A": 1}"#).is_err());
    }
}
