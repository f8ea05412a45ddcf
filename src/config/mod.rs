//! Configuration models for the form and its relay.

pub mod form;

pub use form::{FormConfig, RelayConfig, TransportMode};
