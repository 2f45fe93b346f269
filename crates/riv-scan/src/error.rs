use thiserror::Error;

/// Errors that stop a scan before it starts. Per-zone failures never surface
/// here; they become `ZoneStatus::Error` results.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Another scan is already running on this scanner.
    #[error("a scan is already in progress")]
    AlreadyRunning,
}
