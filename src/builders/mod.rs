//! Builders to construct form handles from configuration.

pub mod form_builder;

pub use form_builder::{build_from_env, FormBuilder};
