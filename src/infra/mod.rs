//! Infrastructure adapters for relay delivery.

pub mod relay;

pub use relay::{FetchTransport, InMemoryTransport, NavigatingTransport, RelayTransport};
