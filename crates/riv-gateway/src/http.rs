//! Shared HTTP response helpers.
//!
//! Centralizes the status check and body decoding so the client stays
//! focused on request construction.

use riv_core::Container;

use crate::error::GatewayError;

/// Longest diagnostic body kept in [`GatewayError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Return the response unchanged on `200`, otherwise [`GatewayError::Http`]
/// carrying the status and (truncated) body text.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status == reqwest::StatusCode::OK {
        return Ok(resp);
    }
    let mut message = resp.text().await.unwrap_or_default();
    if message.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| message.is_char_boundary(i))
            .unwrap_or(0);
        message.truncate(cut);
    }
    Err(GatewayError::Http {
        status: status.as_u16(),
        message,
    })
}

/// Decode a `getContainer` body. Anything that is not a container object is a
/// [`GatewayError::Parse`].
pub fn parse_container(body: &str) -> Result<Container, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))
}
