//! The container hierarchy returned by `POST /api/getContainer`.
//!
//! A response describes one container and exactly one level of its children
//! (drop zone → pallet → tote → item). Descending further means asking the
//! gateway again for a child's ID.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sortation category values that carry no routing information.
pub const IGNORED_CATEGORIES: [&str; 2] = ["N/A", "Empty"];

/// A single container node as returned by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub container_id: String,

    #[serde(default)]
    pub container_type: Option<String>,

    /// One level of children. `None` or empty means a leaf.
    #[serde(default)]
    pub child_containers: Option<Vec<Container>>,

    /// Child count reported by the parent; used as the unit count at tote level.
    #[serde(default)]
    pub num_of_child_containers: Option<u64>,

    #[serde(default)]
    pub sortation_categories: Option<Vec<String>>,

    /// Singular form some payloads use instead of `sortationCategories`.
    #[serde(default)]
    pub sortation_category: Option<String>,

    #[serde(default)]
    pub container_properties: Option<ContainerProperties>,

    /// Location, status, modified date and anything else the core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nested property bag. Only the Clean Decant Date is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    #[serde(default)]
    pub clean_decant_date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    /// Immediate children, empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.child_containers.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Sortation categories, falling back to the singular field when the list is absent.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        let list = self.sortation_categories.as_deref().unwrap_or_default();
        let fallback = if list.is_empty() {
            self.sortation_category.as_deref()
        } else {
            None
        };
        list.iter()
            .map(String::as_str)
            .chain(fallback)
            .map(str::trim)
            .filter(|category| !category.is_empty())
    }

    /// Categories that carry routing information (no `N/A`/`Empty` placeholders).
    pub fn routed_categories(&self) -> impl Iterator<Item = &str> {
        self.categories()
            .filter(|category| !IGNORED_CATEGORIES.contains(category))
    }

    /// First category, treated as the container's primary routing class.
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.routed_categories().next()
    }

    /// Tote-level Clean Decant Date, if present and non-blank.
    #[must_use]
    pub fn clean_decant_date(&self) -> Option<&str> {
        self.container_properties
            .as_ref()
            .and_then(|props| props.clean_decant_date.as_deref())
            .map(str::trim)
            .filter(|date| !date.is_empty())
    }

    /// Unit count shortcut reported by the parent level.
    #[must_use]
    pub fn unit_hint(&self) -> Option<u64> {
        self.num_of_child_containers
    }
}
