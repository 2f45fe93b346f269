//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when calling `getContainer`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure: no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived with a non-200 status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Diagnostic text from the response body, possibly truncated.
        message: String,
    },

    /// The response body was not a JSON container.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be built from configuration.
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// Identifiers offered to the bootstrap probe are placeholders or blank.
    #[error("invalid session identity: {0}")]
    InvalidIdentity(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Self::Network(message)
    }
}

impl GatewayError {
    /// `400` is how the endpoint reports a zone that is empty or does not exist.
    #[must_use]
    pub const fn is_empty_zone(&self) -> bool {
        matches!(self, Self::Http { status: 400, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_400_is_an_empty_zone() {
        let empty = GatewayError::Http {
            status: 400,
            message: String::new(),
        };
        let server = GatewayError::Http {
            status: 500,
            message: String::new(),
        };
        assert!(empty.is_empty_zone());
        assert!(!server.is_empty_zone());
        assert!(!GatewayError::Parse("x".into()).is_empty_zone());
        assert!(!GatewayError::Network("reset".into()).is_empty_zone());
    }
}
