//! Error types for form operations and relay transports.

use thiserror::Error;

use crate::core::posts::PostId;
use crate::core::session::ContactField;

/// Errors produced by form components.
///
/// Every variant is recoverable: the session stays editable and the message
/// is suitable for display next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A likes edit would push the total past the ceiling; the value was clamped.
    #[error("total likes cannot exceed {ceiling}; {available} likes still available")]
    QuotaExceeded {
        /// Configured ceiling.
        ceiling: u32,
        /// Likes still available to the edited entry.
        available: u32,
    },
    /// No likes left to hand out to a new post.
    #[error("maximum of {ceiling} likes reached; no more posts can be added")]
    QuotaExhausted {
        /// Configured ceiling.
        ceiling: u32,
    },
    /// A required contact field is empty.
    #[error("please fill in your {0}")]
    MissingContactField(ContactField),
    /// At least one post has no URL.
    #[error("please fill in all Instagram post URLs")]
    MissingPostUrl,
    /// A post URL does not look like an Instagram post (strict policy only).
    #[error("post {0} does not look like an Instagram post URL")]
    MalformedUrl(PostId),
    /// Nothing to order.
    #[error("request at least one like before submitting")]
    NoLikesRequested,
    /// The referenced post does not exist.
    #[error("unknown post {0}")]
    UnknownPost(PostId),
    /// A submission is already in flight.
    #[error("submission already in progress")]
    SubmissionInFlight,
    /// The session was already submitted; reset to start over.
    #[error("form already submitted")]
    AlreadySubmitted,
    /// The relay call failed.
    #[error("something went wrong while sending the form, please try again later ({0})")]
    Transport(String),
}

/// Errors produced by relay transports.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),
    /// The relay answered with a non-success status.
    #[error("relay rejected submission with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },
    /// The transport is shut down or its receiver went away.
    #[error("transport closed")]
    Closed,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Rejected {
                status: status.as_u16(),
            },
            None => Self::Request(err.to_string()),
        }
    }
}

impl From<TransportError> for FormError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_exceeded_mentions_availability() {
        let err = FormError::QuotaExceeded {
            ceiling: 1000,
            available: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("1000"));
        assert!(msg.contains("100 likes still available"));
    }

    #[test]
    fn transport_error_converts_to_form_error() {
        let err: FormError = TransportError::Rejected { status: 502 }.into();
        assert!(matches!(err, FormError::Transport(ref m) if m.contains("502")));
    }

    #[test]
    fn missing_contact_field_names_field() {
        let err = FormError::MissingContactField(ContactField::Phone);
        assert_eq!(err.to_string(), "please fill in your phone number");
    }
}
