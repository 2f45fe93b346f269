//! Cross-cutting error types for riv.
//!
//! Crate-specific errors (`GatewayError`, `SessionError`, ...) live in their
//! own crates. The CLI converges everything through `anyhow`.

use thiserror::Error;

/// Errors raised by core helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A legacy `DD-MM-YYYY[ HH:MM]` date string could not be parsed.
    #[error("Invalid legacy date '{0}'")]
    InvalidDate(String),

    /// A zone range segment is malformed.
    #[error("Invalid zone segment '{input}': {reason}")]
    InvalidSegment { input: String, reason: String },

    /// A destination mapping blob is not a JSON object of strings.
    #[error("Invalid destination map: {0}")]
    InvalidDestinationMap(#[from] serde_json::Error),
}
