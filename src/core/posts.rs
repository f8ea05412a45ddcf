//! Post collection: the ordered list of requested posts and its running total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ledger::{parse_likes, QuotaDecision, QuotaLedger};
use crate::core::FormError;

/// Session-unique post identifier. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One Instagram post and the likes requested for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEntry {
    /// Identifier.
    pub id: PostId,
    /// Raw URL as typed; may be empty until submission.
    pub url: String,
    /// Requested likes.
    pub likes: u32,
}

/// Editable field of a post entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    /// The post URL.
    Url,
    /// The requested like count.
    Likes,
}

/// Ordered post entries with a running likes total.
///
/// Always holds at least one entry.
#[derive(Debug, Clone)]
pub struct PostCollection {
    entries: Vec<PostEntry>,
    next_id: u64,
    total: u32,
}

impl PostCollection {
    /// A collection with a single empty post holding `default_likes`, clamped to the ceiling.
    #[must_use]
    pub fn with_default(ledger: &QuotaLedger, default_likes: u32) -> Self {
        let likes = default_likes.min(ledger.ceiling());
        Self {
            entries: vec![PostEntry {
                id: PostId(1),
                url: String::new(),
                likes,
            }],
            next_id: 2,
            total: likes,
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[PostEntry] {
        &self.entries
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, id: PostId) -> Option<&PostEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running likes total.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Append a new empty post if any likes are left.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::QuotaExhausted`] when the total already sits at
    /// the ceiling; the collection is left untouched.
    pub fn add_entry(
        &mut self,
        ledger: &QuotaLedger,
        default_increment: u32,
    ) -> Result<PostId, FormError> {
        if ledger.is_exhausted(self.total) {
            return Err(FormError::QuotaExhausted {
                ceiling: ledger.ceiling(),
            });
        }

        let id = PostId(self.next_id);
        self.next_id += 1;
        let likes = ledger.default_allocation(self.total, default_increment);
        self.entries.push(PostEntry {
            id,
            url: String::new(),
            likes,
        });
        self.total += likes;
        tracing::debug!(post = %id, likes, total = self.total, "post added");
        Ok(id)
    }

    /// Remove a post and release its likes.
    ///
    /// Returns `None` without touching anything when only one post remains
    /// or the id is unknown.
    pub fn remove_entry(&mut self, id: PostId) -> Option<PostEntry> {
        if self.entries.len() <= 1 {
            return None;
        }
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(idx);
        self.total = self.total.saturating_sub(removed.likes);
        tracing::debug!(post = %id, released = removed.likes, total = self.total, "post removed");
        Some(removed)
    }

    /// Store a URL verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownPost`] if `id` is not in the collection.
    pub fn update_url(&mut self, id: PostId, url: &str) -> Result<(), FormError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(FormError::UnknownPost(id))?;
        url.clone_into(&mut entry.url);
        Ok(())
    }

    /// Coerce `raw`, clamp it through the ledger and store the result.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownPost`] if `id` is not in the collection.
    /// A clamped edit is not an error here; it is reported in the decision.
    pub fn update_likes(
        &mut self,
        ledger: &QuotaLedger,
        id: PostId,
        raw: &str,
    ) -> Result<QuotaDecision, FormError> {
        if self.get(id).is_none() {
            return Err(FormError::UnknownPost(id));
        }
        let decision = ledger.propose_change(&self.entries, id, parse_likes(raw));
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.likes = decision.value;
        }
        self.total = decision.total;
        Ok(decision)
    }
}
