//! # Likes Order Form
//!
//! The state machine behind a free-likes order form: a visitor enters contact
//! details and a list of Instagram posts with requested like counts, the form
//! keeps the total under a fixed ceiling, and a validated order is relayed by
//! email through a FormSubmit-style endpoint.
//!
//! ## Pieces
//!
//! - **Quota ledger**: clamps each likes edit so the total never exceeds the ceiling
//! - **Post collection**: ordered entries with stable ids and a running total
//! - **Validator**: required fields, URL presence, optional strict URL shape
//! - **Submission pipeline**: builds the relay payload and drives one transport call
//! - **Transports**: form-encoded redirect flow, or multipart with an opaque response
//!
//! ## Example
//!
//! ```rust,ignore
//! use likes_order_form::builders::FormBuilder;
//! use likes_order_form::config::FormConfig;
//! use likes_order_form::core::{ContactField, PostField, PostId};
//!
//! let form = FormBuilder::new(FormConfig::with_ceiling(1000))
//!     .on_submitted(|| println!("hide the page header"))
//!     .build()?;
//!
//! form.set_contact_field(ContactField::Name, "Sanne")?;
//! form.set_contact_field(ContactField::Email, "sanne@example.nl")?;
//! form.set_contact_field(ContactField::Phone, "06 12345678")?;
//! form.update_post(PostId(1), PostField::Url, "https://www.instagram.com/p/C1xyZ/")?;
//! form.add_post()?;
//!
//! form.submit().await?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Form state, quota accounting, validation and submission.
pub mod core;
/// Configuration models for the form and relay.
pub mod config;
/// Builders to construct form handles from configuration.
pub mod builders;
/// Relay transports.
pub mod infra;
/// Host-facing handle, actions and runtime adapters.
pub mod runtime;
/// Shared utilities.
pub mod util;
