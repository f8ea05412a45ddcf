//! In-memory transport for development and testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{Acknowledgement, RelayPayload, Transport, TransportError};

#[derive(Default)]
struct Recorded {
    sent: Vec<RelayPayload>,
    failures: VecDeque<String>,
}

/// Records every payload instead of sending it.
///
/// Clones share the same record, so a test can keep one clone and hand
/// the other to the pipeline.
#[derive(Clone, Default)]
pub struct InMemoryTransport {
    inner: Arc<Mutex<Recorded>>,
}

impl InMemoryTransport {
    /// Create an empty transport that acknowledges everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `reason`. Calls queue up in order.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.inner.lock().failures.push_back(reason.into());
    }

    /// Payloads acknowledged so far.
    #[must_use]
    pub fn sent(&self) -> Vec<RelayPayload> {
        self.inner.lock().sent.clone()
    }

    /// Number of acknowledged payloads.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.inner.lock().sent.len()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, payload: &RelayPayload) -> Result<Acknowledgement, TransportError> {
        let mut inner = self.inner.lock();
        if let Some(reason) = inner.failures.pop_front() {
            return Err(TransportError::Request(reason));
        }
        inner.sent.push(payload.clone());
        Ok(Acknowledgement::Opaque)
    }
}
