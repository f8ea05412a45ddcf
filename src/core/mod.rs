//! Form state, quota accounting, validation and submission.

pub mod error;
pub mod events;
pub mod ledger;
pub mod payload;
pub mod posts;
pub mod session;
pub mod submission;
pub mod transport;
pub mod validator;

pub use error::{AppResult, FormError, TransportError};
pub use events::{
    InMemoryNotificationSink, Notification, NotificationSink, NotificationVariant,
    TracingNotificationSink,
};
#[cfg(feature = "tokio-runtime")]
pub use events::ChannelNotificationSink;
pub use ledger::{parse_likes, QuotaDecision, QuotaLedger};
pub use payload::{formatted_output, PayloadTemplate, RelayPayload};
pub use posts::{PostCollection, PostEntry, PostField, PostId};
pub use session::{ContactField, ContactInfo, FormSession, SubmissionState};
pub use submission::{Spawn, SubmissionPipeline};
pub use transport::{Acknowledgement, Transport};
pub use validator::{advisories, is_instagram_post_url, validate, UrlPolicy};
