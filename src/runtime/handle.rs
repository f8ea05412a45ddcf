//! Shared handle the host drives the form through.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::FormConfig;
use crate::core::{
    ContactField, FormError, FormSession, Notification, PostField, PostId, QuotaDecision, Spawn,
    SubmissionPipeline, SubmissionState, Transport,
};
use crate::runtime::api::FormView;

/// Cloneable handle over one session and its submission pipeline.
///
/// Every method takes the session lock briefly; `submit` releases it for
/// the duration of the relay call so the host can keep rendering.
pub struct FormHandle<T> {
    session: Arc<Mutex<FormSession>>,
    pipeline: Arc<SubmissionPipeline<T>>,
}

impl<T> Clone for FormHandle<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<T: Transport> FormHandle<T> {
    /// Create a fresh session and post the first-use notice.
    pub fn new(config: &FormConfig, pipeline: SubmissionPipeline<T>) -> Self {
        let handle = Self {
            session: Arc::new(Mutex::new(FormSession::new(config))),
            pipeline: Arc::new(pipeline),
        };
        handle.pipeline.notify(Notification::first_use());
        handle
    }

    /// Read the session under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&FormSession) -> R) -> R {
        f(&*self.session.lock())
    }

    /// Submission pipeline.
    pub fn pipeline(&self) -> &SubmissionPipeline<T> {
        &self.pipeline
    }

    /// Set a contact field.
    ///
    /// # Errors
    ///
    /// See [`FormSession::set_contact_field`].
    pub fn set_contact_field(&self, field: ContactField, value: &str) -> Result<(), FormError> {
        self.session.lock().set_contact_field(field, value)
    }

    /// Update one field of a post.
    ///
    /// # Errors
    ///
    /// See [`FormSession::update_post`].
    pub fn update_post(&self, id: PostId, field: PostField, raw: &str) -> Result<(), FormError> {
        self.session.lock().update_post(id, field, raw)
    }

    /// Set a post's likes and return the ledger's decision.
    ///
    /// # Errors
    ///
    /// See [`FormSession::update_likes`].
    pub fn update_likes(&self, id: PostId, raw: &str) -> Result<QuotaDecision, FormError> {
        self.session.lock().update_likes(id, raw)
    }

    /// Append a post.
    ///
    /// # Errors
    ///
    /// See [`FormSession::add_post`].
    pub fn add_post(&self) -> Result<PostId, FormError> {
        self.session.lock().add_post()
    }

    /// Remove a post.
    ///
    /// # Errors
    ///
    /// See [`FormSession::remove_post`].
    pub fn remove_post(&self, id: PostId) -> Result<bool, FormError> {
        self.session.lock().remove_post(id)
    }

    /// Reset to a blank form.
    ///
    /// # Errors
    ///
    /// See [`FormSession::reset`].
    pub fn reset(&self) -> Result<(), FormError> {
        self.session.lock().reset()
    }

    /// Submit and wait for the outcome.
    ///
    /// # Errors
    ///
    /// See [`SubmissionPipeline::submit`].
    pub async fn submit(&self) -> Result<SubmissionState, FormError> {
        self.pipeline.submit(&self.session).await
    }

    /// Start a submission on `spawner` and return immediately.
    ///
    /// The outcome lands in the session state and the notification sink.
    pub fn spawn_submit<S: Spawn>(&self, spawner: &S) {
        let handle = self.clone();
        spawner.spawn(async move {
            if let Err(err) = handle.submit().await {
                tracing::debug!(%err, "background submission did not succeed");
            }
        });
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> FormView {
        FormView::from_session(&self.session.lock())
    }
}
