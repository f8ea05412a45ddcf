//! Form-encoded relay transport that follows the relay's redirect flow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::core::{Acknowledgement, RelayPayload, Transport, TransportError};

const MAX_REDIRECTS: usize = 10;

/// Posts the payload the way a browser submits a plain HTML form.
///
/// The relay answers with a redirect to its confirmation page; the final
/// response must be a success for the submission to count.
#[derive(Debug, Clone)]
pub struct NavigatingTransport {
    client: Client,
    endpoint: String,
}

impl NavigatingTransport {
    /// Create a transport posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// The HTTP client could not be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Relay URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for NavigatingTransport {
    async fn send(&self, payload: &RelayPayload) -> Result<Acknowledgement, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(payload.fields())
            .send()
            .await?
            .error_for_status()?;

        let location = response.url().to_string();
        tracing::debug!(status = %response.status(), %location, "relay redirect flow finished");
        Ok(Acknowledgement::Redirected { location })
    }
}
