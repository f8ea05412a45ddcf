//! Host-facing API: the form handle, action dispatch and runtime adapters.

pub mod api;
pub mod handle;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{dispatch, FormAction, FormView, PostView};
pub use handle::FormHandle;
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
