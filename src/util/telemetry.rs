//! Telemetry helpers for structured logging and tracing.

const DEFAULT_FILTER: &str = "likes_order_form=info";

/// Initialize tracing. Hosts can install their own subscriber; this helper
/// installs an env-filtered fmt subscriber if none is set, falling back to
/// `likes_order_form=info` when `RUST_LOG` is absent.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
