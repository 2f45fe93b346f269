//! Explicit session bootstrap, the fallback when passive capture has not
//! seen a request yet.

use riv_core::session::{SENTINEL_ASSOCIATE, SENTINEL_WAREHOUSE_ID};

use crate::error::GatewayError;
use crate::{ContainerGateway, FetchOptions};

/// Probe the endpoint with candidate identifiers and store them if accepted.
///
/// A `200`, or a `400` for an empty probe container, shows the endpoint
/// understood the identifiers. Any other outcome leaves the store untouched.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidIdentity`] for blank or placeholder
/// identifiers, otherwise whatever the probe request failed with.
pub async fn bootstrap_session(
    gateway: &ContainerGateway,
    warehouse_id: &str,
    associate: &str,
    probe_container: &str,
) -> Result<(), GatewayError> {
    let warehouse_id = warehouse_id.trim();
    let associate = associate.trim();
    if warehouse_id.is_empty() || associate.is_empty() {
        return Err(GatewayError::InvalidIdentity(
            "warehouse ID and associate are required".into(),
        ));
    }
    if warehouse_id == SENTINEL_WAREHOUSE_ID || associate == SENTINEL_ASSOCIATE {
        return Err(GatewayError::InvalidIdentity(format!(
            "'{warehouse_id}'/'{associate}' are placeholder values"
        )));
    }

    match gateway
        .fetch_as(probe_container, warehouse_id, associate, FetchOptions::default())
        .await
    {
        Ok(_) => {}
        Err(error) if error.is_empty_zone() => {
            tracing::debug!(probe_container, "probe container is empty; identity accepted");
        }
        Err(error) => {
            tracing::warn!(probe_container, %error, "session bootstrap probe failed");
            return Err(error);
        }
    }

    gateway.session().update(warehouse_id, associate, None);
    tracing::info!(warehouse_id, associate, "session bootstrapped");
    Ok(())
}
