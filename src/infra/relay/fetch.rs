//! Multipart relay transport with an opaque response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;

use crate::core::{Acknowledgement, RelayPayload, Transport, TransportError};

/// Posts the payload as multipart form data without navigating.
///
/// Whatever the relay answers is ignored: finishing the request is the
/// acknowledgement. Only connection-level failures surface as errors.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    client: Client,
    endpoint: String,
}

impl FetchTransport {
    /// Create a transport posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// The HTTP client could not be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
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
impl Transport for FetchTransport {
    async fn send(&self, payload: &RelayPayload) -> Result<Acknowledgement, TransportError> {
        let form = payload
            .fields()
            .iter()
            .fold(Form::new(), |form, (key, value)| form.text(key.clone(), value.clone()));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        tracing::debug!(status = %response.status(), "relay response not inspected");
        Ok(Acknowledgement::Opaque)
    }
}
