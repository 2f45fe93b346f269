//! The seam between scan logic and wherever containers come from.

use std::future::Future;
use std::sync::Arc;

use riv_core::Container;

use crate::error::GatewayError;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Demote per-request diagnostics from `debug` to `trace`. Does not change
    /// success or failure.
    pub silent: bool,
}

impl FetchOptions {
    #[must_use]
    pub const fn silent() -> Self {
        Self { silent: true }
    }
}

/// Anything that can answer "what is directly inside this container?".
///
/// One call is one round trip and returns exactly one level of children.
/// Implementations do not retry.
pub trait ContainerSource: Send + Sync {
    fn fetch_container(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> impl Future<Output = Result<Container, GatewayError>> + Send;
}

impl<T: ContainerSource> ContainerSource for &T {
    fn fetch_container(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> impl Future<Output = Result<Container, GatewayError>> + Send {
        (**self).fetch_container(container_id, opts)
    }
}

impl<T: ContainerSource> ContainerSource for Arc<T> {
    fn fetch_container(
        &self,
        container_id: &str,
        opts: FetchOptions,
    ) -> impl Future<Output = Result<Container, GatewayError>> + Send {
        (**self).fetch_container(container_id, opts)
    }
}
