//! # riv-session
//!
//! Holds the warehouse ID and operator identity the `getContainer` API needs
//! on top of cookie authentication.
//!
//! The store is an explicit object shared behind an `Arc`, read by every
//! gateway call. It is fed by:
//! - [`SessionStore::observe`]: passive capture of a request the host
//!   application already made (the primary source in practice)
//! - [`SessionStore::update`]: explicit identifiers, e.g. after a bootstrap probe
//!
//! Every update is persisted as JSON. [`SessionStore::load`] discards sessions
//! that are stale or carry sentinel placeholders.

mod error;
mod observer;
mod store;

pub use error::SessionError;
pub use observer::CapturedIdentity;
pub use store::SessionStore;
