//! Builder wiring configuration, transport, notifications and the host callback.

use crate::config::FormConfig;
use crate::core::{
    AppResult, NotificationSink, PayloadTemplate, SubmissionPipeline, Transport, TransportError,
};
use crate::infra::RelayTransport;
use crate::runtime::FormHandle;

type SubmittedCallback = Box<dyn FnOnce() + Send>;

/// Assembles a [`FormHandle`] from a [`FormConfig`].
pub struct FormBuilder {
    config: FormConfig,
    notifier: Option<Box<dyn NotificationSink>>,
    on_submitted: Option<SubmittedCallback>,
}

impl FormBuilder {
    /// Start from `config`.
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            notifier: None,
            on_submitted: None,
        }
    }

    /// Configuration being built.
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Route notifications to `sink` instead of the log.
    #[must_use]
    pub fn notifier(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.notifier = Some(sink);
        self
    }

    /// Run `callback` once, after the first successful submission.
    #[must_use]
    pub fn on_submitted<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_submitted = Some(Box::new(callback));
        self
    }

    /// Build with the HTTP transport selected in the configuration.
    ///
    /// # Errors
    ///
    /// Invalid configuration or an HTTP client that cannot be built.
    pub fn build(self) -> AppResult<FormHandle<RelayTransport>> {
        self.build_with_factory(|cfg| RelayTransport::from_config(&cfg.relay))
    }

    /// Build with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Invalid configuration.
    pub fn build_with<T: Transport>(self, transport: T) -> AppResult<FormHandle<T>> {
        self.build_with_factory(|_| Ok(transport))
    }

    fn build_with_factory<T, F>(self, factory: F) -> AppResult<FormHandle<T>>
    where
        T: Transport,
        F: FnOnce(&FormConfig) -> Result<T, TransportError>,
    {
        self.config
            .validate()
            .map_err(|e| anyhow::anyhow!("config invalid: {e}"))?;

        let transport = factory(&self.config)?;
        let mut pipeline = SubmissionPipeline::new(transport, PayloadTemplate::from(&self.config));
        if let Some(sink) = self.notifier {
            pipeline = pipeline.with_notifier(sink);
        }
        if let Some(callback) = self.on_submitted {
            pipeline = pipeline.on_submitted(callback);
        }

        tracing::info!(
            ceiling = self.config.ceiling,
            endpoint = %self.config.relay.endpoint,
            transport = ?self.config.relay.transport,
            "order form ready"
        );
        Ok(FormHandle::new(&self.config, pipeline))
    }
}

/// Build a form from `LIKES_FORM_*` environment variables (and `.env`).
///
/// # Errors
///
/// See [`FormConfig::from_env`] and [`FormBuilder::build`].
pub fn build_from_env() -> AppResult<FormHandle<RelayTransport>> {
    FormBuilder::new(FormConfig::from_env()?).build()
}
