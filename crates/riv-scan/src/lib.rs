//! # riv-scan
//!
//! Aggregates the container hierarchy behind a list of drop zones.
//!
//! - [`BatchScanner`] fetches zones in fixed-size concurrent batches,
//!   optionally descending to tote level for unit counts, and collects tote
//!   Clean Decant Dates on the way.
//! - [`CddResolver`] picks the oldest of those dates that is confirmed by the
//!   items inside its tote.
//! - [`ScanSummary`] rolls results up for display.
//!
//! A scanner runs one scan at a time; a second concurrent call returns
//! [`ScanError::AlreadyRunning`] instead of interleaving.

mod cdd;
mod error;
mod scanner;
mod summary;

pub use cdd::{CddResolution, CddResolver, rank_candidates};
pub use error::ScanError;
pub use scanner::{BatchScanner, ScanReport, ScanSettings};
pub use summary::ScanSummary;
