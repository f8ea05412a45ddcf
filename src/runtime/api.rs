//! Host-facing request/response models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{
    is_instagram_post_url, ContactField, ContactInfo, FormError, FormSession, PostField, PostId,
    SubmissionState, Transport,
};
use crate::runtime::FormHandle;

/// One post as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    /// Identifier.
    pub id: PostId,
    /// 1-based display position.
    pub position: usize,
    /// Raw URL.
    pub url: String,
    /// Requested likes.
    pub likes: u32,
    /// False when the URL is filled in but malformed.
    pub url_looks_valid: bool,
}

/// Everything the host needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    /// Session identifier.
    pub session_id: Uuid,
    /// Contact details.
    pub contact: ContactInfo,
    /// Posts in order.
    pub posts: Vec<PostView>,
    /// Running total.
    pub total_likes: u32,
    /// Ceiling.
    pub ceiling: u32,
    /// Likes still available.
    pub headroom: u32,
    /// Add-post control enabled.
    pub can_add_post: bool,
    /// Remove controls shown.
    pub can_remove_post: bool,
    /// Submit control enabled.
    pub can_submit: bool,
    /// Submission state.
    pub state: SubmissionState,
    /// Inline error text.
    pub error: Option<String>,
    /// No successful submission yet.
    pub first_submit: bool,
    /// Posts whose filled-in URL does not look like an Instagram post.
    pub url_advisories: Vec<PostId>,
}

impl FormView {
    /// Snapshot a session.
    #[must_use]
    pub fn from_session(session: &FormSession) -> Self {
        let ledger = session.ledger();
        let total = session.total_likes();
        Self {
            session_id: session.session_id(),
            contact: session.contact().clone(),
            posts: session
                .posts()
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, e)| PostView {
                    id: e.id,
                    position: idx + 1,
                    url: e.url.clone(),
                    likes: e.likes,
                    url_looks_valid: is_instagram_post_url(&e.url),
                })
                .collect(),
            total_likes: total,
            ceiling: ledger.ceiling(),
            headroom: ledger.headroom(total),
            can_add_post: session.can_add_post(),
            can_remove_post: session.can_remove_post(),
            can_submit: session.can_submit(),
            state: session.state(),
            error: session.error().map(ToString::to_string),
            first_submit: session.first_submit(),
            url_advisories: session.advisories(),
        }
    }
}

/// A user action, as sent by a host over a message channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormAction {
    /// Edit a contact field.
    SetContact {
        /// Field.
        field: ContactField,
        /// New value.
        value: String,
    },
    /// Edit a post field.
    UpdatePost {
        /// Post.
        id: PostId,
        /// Field.
        field: PostField,
        /// Raw input.
        value: String,
    },
    /// Add a post.
    AddPost,
    /// Remove a post.
    RemovePost {
        /// Post.
        id: PostId,
    },
    /// Start over.
    Reset,
    /// Submit and wait for the outcome.
    Submit,
}

/// Apply an action and return the resulting view.
///
/// # Errors
///
/// The action's error. Errors that the session also records inline are
/// visible in the next [`FormView`] too.
pub async fn dispatch<T: Transport>(
    handle: &FormHandle<T>,
    action: FormAction,
) -> Result<FormView, FormError> {
    match action {
        FormAction::SetContact { field, value } => handle.set_contact_field(field, &value)?,
        FormAction::UpdatePost { id, field, value } => handle.update_post(id, field, &value)?,
        FormAction::AddPost => {
            handle.add_post()?;
        }
        FormAction::RemovePost { id } => {
            handle.remove_post(id)?;
        }
        FormAction::Reset => handle.reset()?,
        FormAction::Submit => {
            handle.submit().await?;
        }
    }
    Ok(handle.view())
}
