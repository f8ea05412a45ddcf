//! Runs background form submissions on tokio.

use std::future::Future;

use tokio::runtime::Handle;

use crate::core::Spawn;

/// Hands [`FormHandle::spawn_submit`](crate::runtime::FormHandle::spawn_submit)
/// work to a tokio runtime so UI hosts never block on the relay call.
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    runtime: Handle,
}

impl TokioSpawner {
    /// Submit on the runtime behind `runtime`.
    #[must_use]
    pub const fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Submit on the runtime this is called from.
    ///
    /// # Panics
    ///
    /// Outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(self.runtime.spawn(fut));
        tracing::trace!("background submission spawned");
    }
}
