//! Submission pipeline: validate, build the payload, send, record the outcome.

use std::future::Future;

use parking_lot::Mutex;

use crate::core::events::{Notification, NotificationSink, TracingNotificationSink};
use crate::core::payload::{PayloadTemplate, RelayPayload};
use crate::core::session::{FormSession, SubmissionState};
use crate::core::transport::{Acknowledgement, Transport};
use crate::core::FormError;

/// Abstraction for spawning a submission on a runtime.
pub trait Spawn {
    /// Spawn a future and forget about it.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

type SubmittedCallback = Box<dyn FnOnce() + Send>;

/// Drives a session through one relay call per submit.
///
/// The session lock is only held while validating/building and while
/// recording the outcome, never across the transport call.
pub struct SubmissionPipeline<T> {
    transport: T,
    template: PayloadTemplate,
    notifier: Mutex<Box<dyn NotificationSink>>,
    on_submitted: Mutex<Option<SubmittedCallback>>,
}

impl<T: Transport> SubmissionPipeline<T> {
    /// Create a pipeline that logs its notifications.
    pub fn new(transport: T, template: PayloadTemplate) -> Self {
        Self {
            transport,
            template,
            notifier: Mutex::new(Box::new(TracingNotificationSink)),
            on_submitted: Mutex::new(None),
        }
    }

    /// Route notifications to `sink`.
    #[must_use]
    pub fn with_notifier(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.notifier = Mutex::new(sink);
        self
    }

    /// Register the host callback run after the first successful submission.
    #[must_use]
    pub fn on_submitted<F>(self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        *self.on_submitted.lock() = Some(Box::new(callback));
        self
    }

    /// Underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Payload template in use.
    pub const fn template(&self) -> &PayloadTemplate {
        &self.template
    }

    /// Push a notification to the host.
    pub fn notify(&self, notification: Notification) {
        self.notifier.lock().notify(notification);
    }

    /// Submit the session.
    ///
    /// # Errors
    ///
    /// Validation failures and re-entry are returned before any network
    /// call. A transport failure moves the session to
    /// [`SubmissionState::Failed`] and is returned as [`FormError::Transport`].
    pub async fn submit(&self, session: &Mutex<FormSession>) -> Result<SubmissionState, FormError> {
        let (payload, session_id) = {
            let mut guard = session.lock();
            guard.begin_submission()?;
            let payload = RelayPayload::build(&self.template, guard.contact(), guard.posts());
            (payload, guard.session_id())
        };

        tracing::info!(
            session = %session_id,
            fields = payload.len(),
            total_likes = payload.get("total_likes").unwrap_or("0"),
            "submitting form"
        );

        let outcome = self.transport.send(&payload).await;

        match outcome {
            Ok(ack) => {
                session.lock().finish_success();
                match &ack {
                    Acknowledgement::Redirected { location } => {
                        tracing::info!(session = %session_id, %location, "relay acknowledged submission");
                    }
                    Acknowledgement::Opaque => {
                        tracing::info!(session = %session_id, "relay call completed");
                    }
                }
                self.notify(Notification::submitted());
                let callback = self.on_submitted.lock().take();
                if let Some(callback) = callback {
                    callback();
                }
                Ok(SubmissionState::Success)
            }
            Err(err) => {
                tracing::error!(session = %session_id, %err, "form submission failed");
                let err = FormError::from(err);
                session.lock().finish_failure(err.clone());
                self.notify(Notification::failed());
                Err(err)
            }
        }
    }
}
