//! Transport abstraction for delivering a payload to the relay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{RelayPayload, TransportError};

/// What the relay told us, as far as the transport can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Acknowledgement {
    /// The relay accepted the post and redirected to its confirmation page.
    Redirected {
        /// Final URL after redirects.
        location: String,
    },
    /// The call completed; the response was deliberately not inspected.
    Opaque,
}

/// Delivers relay payloads.
///
/// Implementations own encoding and I/O; the submission pipeline only sees
/// the outcome.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use likes_order_form::core::{Acknowledgement, RelayPayload, Transport, TransportError};
///
/// struct Discard;
///
/// #[async_trait]
/// impl Transport for Discard {
///     async fn send(&self, _payload: &RelayPayload) -> Result<Acknowledgement, TransportError> {
///         Ok(Acknowledgement::Opaque)
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send one payload.
    async fn send(&self, payload: &RelayPayload) -> Result<Acknowledgement, TransportError>;
}
