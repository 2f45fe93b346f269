use std::path::PathBuf;

use thiserror::Error;

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading, writing or deleting the session file failed.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session could not be encoded.
    #[error("session serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `max_age_hours` does not fit in a duration.
    #[error("session max age of {hours} hours is out of range")]
    MaxAgeOutOfRange { hours: u64 },

    /// No session path was configured and no home directory is known.
    #[error("home directory not found; cannot locate session file")]
    NoHomeDir,
}
