//! Form session: contact details, posts, submission state and the inline error.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::FormConfig;
use crate::core::ledger::{QuotaDecision, QuotaLedger};
use crate::core::posts::{PostCollection, PostField, PostId};
use crate::core::validator::{self, UrlPolicy};
use crate::core::FormError;

/// Required contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    /// Visitor name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Phone];
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email address",
            Self::Phone => "phone number",
        })
    }
}

/// Visitor contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Visitor name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl ContactInfo {
    /// Read a field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }

    fn set(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
        };
        value.clone_into(slot);
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Editable, not yet sent.
    #[default]
    Idle,
    /// Relay call in flight; the form is locked.
    Submitting,
    /// Relay accepted the submission. Terminal until reset.
    Success,
    /// Relay call failed; editable and retryable.
    Failed,
}

/// One visitor's order form.
#[derive(Debug, Clone)]
pub struct FormSession {
    session_id: Uuid,
    ledger: QuotaLedger,
    default_likes: u32,
    default_increment: u32,
    url_policy: UrlPolicy,
    contact: ContactInfo,
    posts: PostCollection,
    state: SubmissionState,
    error: Option<FormError>,
    first_submit: bool,
}

impl FormSession {
    /// Fresh session with one default post.
    #[must_use]
    pub fn new(config: &FormConfig) -> Self {
        let ledger = QuotaLedger::new(config.ceiling);
        Self {
            session_id: Uuid::new_v4(),
            ledger,
            default_likes: config.default_likes,
            default_increment: config.default_increment,
            url_policy: config.url_policy,
            contact: ContactInfo::default(),
            posts: PostCollection::with_default(&ledger, config.default_likes),
            state: SubmissionState::Idle,
            error: None,
            first_submit: true,
        }
    }

    /// Identifier used in logs.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Requested posts.
    #[must_use]
    pub const fn posts(&self) -> &PostCollection {
        &self.posts
    }

    /// Quota ledger in force.
    #[must_use]
    pub const fn ledger(&self) -> &QuotaLedger {
        &self.ledger
    }

    /// Running likes total.
    #[must_use]
    pub const fn total_likes(&self) -> u32 {
        self.posts.total()
    }

    /// Current submission state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Inline error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// True until the first successful submission.
    #[must_use]
    pub const fn first_submit(&self) -> bool {
        self.first_submit
    }

    /// URL policy in force.
    #[must_use]
    pub const fn url_policy(&self) -> UrlPolicy {
        self.url_policy
    }

    /// Posts with a filled-in but malformed URL.
    #[must_use]
    pub fn advisories(&self) -> Vec<PostId> {
        validator::advisories(&self.posts)
    }

    /// Whether the add-post control is enabled.
    #[must_use]
    pub fn can_add_post(&self) -> bool {
        self.is_editable() && !self.ledger.is_exhausted(self.posts.total())
    }

    /// Whether remove controls are shown.
    #[must_use]
    pub fn can_remove_post(&self) -> bool {
        self.is_editable() && self.posts.len() > 1
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_editable() && self.posts.total() > 0
    }

    fn is_editable(&self) -> bool {
        matches!(self.state, SubmissionState::Idle | SubmissionState::Failed)
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.state {
            SubmissionState::Submitting => Err(FormError::SubmissionInFlight),
            SubmissionState::Success => Err(FormError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Failed => Ok(()),
        }
    }

    /// Set a contact field.
    ///
    /// # Errors
    ///
    /// Fails while a submission is in flight or after success.
    pub fn set_contact_field(&mut self, field: ContactField, value: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.contact.set(field, value);
        Ok(())
    }

    /// Store a raw URL for a post.
    ///
    /// # Errors
    ///
    /// Fails for unknown posts, while submitting, or after success.
    pub fn update_url(&mut self, id: PostId, raw: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.posts.update_url(id, raw)
    }

    /// Set a post's likes, clamping to the ceiling.
    ///
    /// The decision's error, if any, becomes the inline error; an accepted
    /// edit clears it.
    ///
    /// # Errors
    ///
    /// Fails for unknown posts, while submitting, or after success.
    pub fn update_likes(&mut self, id: PostId, raw: &str) -> Result<QuotaDecision, FormError> {
        self.ensure_editable()?;
        let decision = self.posts.update_likes(&self.ledger, id, raw)?;
        self.error.clone_from(&decision.error);
        tracing::debug!(
            session = %self.session_id,
            post = %id,
            likes = decision.value,
            total = decision.total,
            "likes updated"
        );
        Ok(decision)
    }

    /// Update one field of a post.
    ///
    /// # Errors
    ///
    /// See [`Self::update_url`] and [`Self::update_likes`].
    pub fn update_post(&mut self, id: PostId, field: PostField, raw: &str) -> Result<(), FormError> {
        match field {
            PostField::Url => self.update_url(id, raw),
            PostField::Likes => self.update_likes(id, raw).map(|_| ()),
        }
    }

    /// Append a post.
    ///
    /// # Errors
    ///
    /// [`FormError::QuotaExhausted`] when no likes are left; it is also
    /// recorded as the inline error.
    pub fn add_post(&mut self) -> Result<PostId, FormError> {
        self.ensure_editable()?;
        match self.posts.add_entry(&self.ledger, self.default_increment) {
            Ok(id) => Ok(id),
            Err(err) => {
                tracing::warn!(session = %self.session_id, %err, "post not added");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Remove a post. Returns false when nothing was removed.
    ///
    /// Any inline error is cleared whenever more than one post exists, even
    /// if `id` is unknown.
    ///
    /// # Errors
    ///
    /// Fails while submitting or after success.
    pub fn remove_post(&mut self, id: PostId) -> Result<bool, FormError> {
        self.ensure_editable()?;
        if self.posts.len() > 1 {
            self.error = None;
        }
        Ok(self.posts.remove_entry(id).is_some())
    }

    /// Back to a blank form with one default post.
    ///
    /// Allowed in any state except while submitting. `first_submit` survives.
    ///
    /// # Errors
    ///
    /// [`FormError::SubmissionInFlight`] while a submission is running.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.state == SubmissionState::Submitting {
            return Err(FormError::SubmissionInFlight);
        }
        self.contact = ContactInfo::default();
        self.posts = PostCollection::with_default(&self.ledger, self.default_likes);
        self.state = SubmissionState::Idle;
        self.error = None;
        tracing::info!(session = %self.session_id, "form reset");
        Ok(())
    }

    /// Validate and lock the form for sending.
    ///
    /// # Errors
    ///
    /// Rejects re-entry and finished sessions; a validation failure is
    /// recorded as the inline error and leaves the state untouched.
    pub fn begin_submission(&mut self) -> Result<(), FormError> {
        self.ensure_editable()?;
        if let Err(err) = validator::validate(&self.contact, &self.posts, self.url_policy) {
            tracing::warn!(session = %self.session_id, %err, "submission blocked");
            self.error = Some(err.clone());
            return Err(err);
        }
        self.state = SubmissionState::Submitting;
        self.error = None;
        Ok(())
    }

    /// Record a successful relay call. Returns true if this was the session's first success.
    pub fn finish_success(&mut self) -> bool {
        let first = self.first_submit;
        self.state = SubmissionState::Success;
        self.first_submit = false;
        self.error = None;
        first
    }

    /// Record a failed relay call; the form becomes editable again.
    pub fn finish_failure(&mut self, err: FormError) {
        self.state = SubmissionState::Failed;
        self.error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_session() -> FormSession {
        let mut session = FormSession::new(&FormConfig::default());
        session.set_contact_field(ContactField::Name, "Sanne").unwrap();
        session
            .set_contact_field(ContactField::Email, "sanne@example.nl")
            .unwrap();
        session
            .set_contact_field(ContactField::Phone, "0612345678")
            .unwrap();
        session
            .update_url(PostId(1), "https://instagram.com/p/ABC123")
            .unwrap();
        session
    }

    #[test]
    fn new_session_has_default_post() {
        let session = FormSession::new(&FormConfig::default());
        assert_eq!(session.posts().len(), 1);
        assert_eq!(session.total_likes(), 500);
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.first_submit());
        assert!(session.can_submit());
        assert!(!session.can_remove_post());
    }

    #[test]
    fn clamped_edit_sets_and_accepted_edit_clears_error() {
        let mut session = FormSession::new(&FormConfig::default());
        session.update_likes(PostId(1), "900").unwrap();
        let second = session.add_post().unwrap();

        let decision = session.update_likes(second, "300").unwrap();
        assert_eq!(decision.value, 100);
        assert!(session.error().unwrap().to_string().contains("100"));

        session.update_likes(second, "50").unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.total_likes(), 950);
    }

    #[test]
    fn add_at_ceiling_records_error() {
        let mut session = FormSession::new(&FormConfig::default());
        session.update_likes(PostId(1), "1000").unwrap();
        assert!(!session.can_add_post());
        assert!(session.add_post().is_err());
        assert_eq!(
            session.error(),
            Some(&FormError::QuotaExhausted { ceiling: 1000 })
        );
        assert_eq!(session.posts().len(), 1);
    }

    #[test]
    fn remove_clears_error() {
        let mut session = FormSession::new(&FormConfig::default());
        let second = session.add_post().unwrap();
        session.update_likes(second, "900").unwrap();
        assert!(session.error().is_some());
        assert!(session.remove_post(second).unwrap());
        assert!(session.error().is_none());
        assert_eq!(session.total_likes(), 500);
    }

    #[test]
    fn remove_of_unknown_post_still_clears_error() {
        let mut session = FormSession::new(&FormConfig::default());
        let second = session.add_post().unwrap();
        session.update_likes(second, "900").unwrap();
        assert_eq!(
            session.error(),
            Some(&FormError::QuotaExceeded {
                ceiling: 1000,
                available: 500
            })
        );

        assert!(!session.remove_post(PostId(99)).unwrap());
        assert!(session.error().is_none());
        assert_eq!(session.posts().len(), 2);
    }

    #[test]
    fn remove_with_single_post_keeps_error() {
        let mut session = FormSession::new(&FormConfig::default());
        session.update_likes(PostId(1), "1000").unwrap();
        assert!(session.add_post().is_err());

        assert!(!session.remove_post(PostId(1)).unwrap());
        assert_eq!(
            session.error(),
            Some(&FormError::QuotaExhausted { ceiling: 1000 })
        );
    }

    #[test]
    fn begin_submission_locks_form() {
        let mut session = filled_session();
        session.begin_submission().unwrap();
        assert_eq!(session.state(), SubmissionState::Submitting);
        assert_eq!(session.begin_submission(), Err(FormError::SubmissionInFlight));
        assert_eq!(
            session.set_contact_field(ContactField::Name, "x"),
            Err(FormError::SubmissionInFlight)
        );
        assert_eq!(session.reset(), Err(FormError::SubmissionInFlight));
    }

    #[test]
    fn failed_submission_is_editable_and_retryable() {
        let mut session = filled_session();
        session.begin_submission().unwrap();
        session.finish_failure(FormError::Transport("offline".into()));
        assert_eq!(session.state(), SubmissionState::Failed);
        assert!(session.can_submit());
        session.begin_submission().unwrap();
        assert!(session.finish_success());
        assert_eq!(session.state(), SubmissionState::Success);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_first_submit_flag() {
        let mut session = filled_session();
        let second = session.add_post().unwrap();
        session
            .update_url(second, "https://instagram.com/p/XYZ789")
            .unwrap();
        session.begin_submission().unwrap();
        assert!(session.finish_success());
        assert_eq!(session.add_post(), Err(FormError::AlreadySubmitted));

        session.reset().unwrap();
        assert_eq!(session.state(), SubmissionState::Idle);
        assert_eq!(session.posts().len(), 1);
        assert_eq!(session.total_likes(), 500);
        assert_eq!(session.contact(), &ContactInfo::default());
        assert!(!session.first_submit());
    }

    #[test]
    fn blocked_submission_keeps_state() {
        let mut session = FormSession::new(&FormConfig::default());
        session.set_contact_field(ContactField::Name, "a").unwrap();
        session.set_contact_field(ContactField::Email, "b").unwrap();
        session.set_contact_field(ContactField::Phone, "c").unwrap();
        assert_eq!(session.begin_submission(), Err(FormError::MissingPostUrl));
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.error().unwrap().to_string().contains("URL"));
    }
}
