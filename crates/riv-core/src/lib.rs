//! # riv-core
//!
//! Core types and helpers shared across all riv crates:
//! - The container hierarchy returned by `getContainer` (zone → pallet → tote → item)
//! - Session identity and its sentinel values
//! - Per-zone scan results and Clean Decant Date candidates
//! - Legacy `DD-MM-YYYY HH:MM` date parsing and display formatting
//! - Zone worklist expansion from prefix/range segments
//! - Sortation category → main destination lookup
//! - Cross-cutting error types

pub mod container;
pub mod dates;
pub mod destinations;
pub mod errors;
pub mod scan;
pub mod session;
pub mod worklist;

pub use container::{Container, ContainerProperties};
pub use destinations::DestinationMap;
pub use errors::CoreError;
pub use scan::{CddCandidate, ScanResult, ZoneStatus};
pub use session::Session;
pub use worklist::{MAX_SEGMENT_ZONES, ZoneSegment};
