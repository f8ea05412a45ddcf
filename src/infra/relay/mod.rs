//! Relay transports.

pub mod fetch;
pub mod memory;
pub mod navigate;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{RelayConfig, TransportMode};
use crate::core::{Acknowledgement, RelayPayload, Transport, TransportError};

pub use fetch::FetchTransport;
pub use memory::InMemoryTransport;
pub use navigate::NavigatingTransport;

/// HTTP transport chosen by [`TransportMode`].
#[derive(Debug, Clone)]
pub enum RelayTransport {
    /// Form-encoded, redirect-following.
    Navigate(NavigatingTransport),
    /// Multipart, opaque response.
    Fetch(FetchTransport),
}

impl RelayTransport {
    /// Build the transport selected in `cfg`.
    ///
    /// # Errors
    ///
    /// The HTTP client could not be built.
    pub fn from_config(cfg: &RelayConfig) -> Result<Self, TransportError> {
        let timeout = cfg.timeout_secs.map(Duration::from_secs);
        Ok(match cfg.transport {
            TransportMode::Navigate => Self::Navigate(NavigatingTransport::new(&cfg.endpoint, timeout)?),
            TransportMode::Fetch => Self::Fetch(FetchTransport::new(&cfg.endpoint, timeout)?),
        })
    }

    /// Selected mode.
    #[must_use]
    pub const fn mode(&self) -> TransportMode {
        match self {
            Self::Navigate(_) => TransportMode::Navigate,
            Self::Fetch(_) => TransportMode::Fetch,
        }
    }
}

#[async_trait]
impl Transport for RelayTransport {
    async fn send(&self, payload: &RelayPayload) -> Result<Acknowledgement, TransportError> {
        match self {
            Self::Navigate(t) => t.send(payload).await,
            Self::Fetch(t) => t.send(payload).await,
        }
    }
}
