//! Submission gate and the Instagram URL shape check.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::posts::{PostCollection, PostId};
use crate::core::session::{ContactField, ContactInfo};
use crate::core::FormError;

static INSTAGRAM_POST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"instagram\.com/p/[A-Za-z0-9_-]+/?(\?.*)?$").unwrap_or_else(|e| panic!("post url pattern: {e}"))
});

/// How URL shape problems affect submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlPolicy {
    /// Malformed URLs are flagged but do not block.
    #[default]
    Advisory,
    /// Malformed URLs block submission.
    Strict,
}

/// True if `url` is empty or looks like an Instagram post link.
#[must_use]
pub fn is_instagram_post_url(url: &str) -> bool {
    url.is_empty() || INSTAGRAM_POST.is_match(url)
}

/// Posts whose URL is filled in but malformed.
#[must_use]
pub fn advisories(posts: &PostCollection) -> Vec<PostId> {
    posts
        .entries()
        .iter()
        .filter(|e| !is_instagram_post_url(&e.url))
        .map(|e| e.id)
        .collect()
}

/// Check that a session may be submitted.
///
/// # Errors
///
/// The first failing rule, in order: empty contact field, empty post URL,
/// malformed URL (strict policy only), zero likes requested.
pub fn validate(
    contact: &ContactInfo,
    posts: &PostCollection,
    policy: UrlPolicy,
) -> Result<(), FormError> {
    for field in ContactField::ALL {
        if contact.get(field).trim().is_empty() {
            return Err(FormError::MissingContactField(field));
        }
    }

    if posts.entries().iter().any(|e| e.url.is_empty()) {
        return Err(FormError::MissingPostUrl);
    }

    if policy == UrlPolicy::Strict {
        if let Some(id) = advisories(posts).first() {
            return Err(FormError::MalformedUrl(*id));
        }
    }

    if posts.total() == 0 {
        return Err(FormError::NoLikesRequested);
    }

    Ok(())
}
