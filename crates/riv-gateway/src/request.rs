//! `getContainer` request body.

use serde::Serialize;

/// Mode the endpoint expects for read-only lookups.
pub const SEARCH_MODE: &str = "SEARCH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRequest<'a> {
    pub container_id: &'a str,
    pub warehouse_id: &'a str,
    pub associate: &'a str,
    pub include_children: bool,
    pub mode: &'static str,
    pub locale: &'a str,
    pub moving_containers: &'a [String],
}

impl<'a> ContainerRequest<'a> {
    #[must_use]
    pub const fn search(
        container_id: &'a str,
        warehouse_id: &'a str,
        associate: &'a str,
        locale: &'a str,
    ) -> Self {
        Self {
            container_id,
            warehouse_id,
            associate,
            include_children: true,
            mode: SEARCH_MODE,
            locale,
            moving_containers: &[],
        }
    }
}
