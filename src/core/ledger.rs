//! Quota ledger: capacity accounting for requested likes.
//!
//! The ledger owns no entries. It answers "how much of this edit fits under
//! the ceiling" given the current entries, and the post collection applies
//! the answer.

use serde::{Deserialize, Serialize};

use crate::core::posts::{PostEntry, PostId};
use crate::core::FormError;

/// Fixed ceiling on the total likes a session may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaLedger {
    ceiling: u32,
}

/// Outcome of a proposed likes edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDecision {
    /// Value to store for the edited entry, clamped if needed.
    pub value: u32,
    /// Total across all entries once `value` is stored.
    pub total: u32,
    /// Set when the proposed value had to be clamped.
    pub error: Option<FormError>,
}

impl QuotaLedger {
    /// Create a ledger enforcing `ceiling`.
    #[must_use]
    pub const fn new(ceiling: u32) -> Self {
        Self { ceiling }
    }

    /// Configured ceiling.
    #[must_use]
    pub const fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Likes still available at `total`.
    #[must_use]
    pub const fn headroom(&self, total: u32) -> u32 {
        self.ceiling.saturating_sub(total)
    }

    /// True once no likes are left to hand out.
    #[must_use]
    pub const fn is_exhausted(&self, total: u32) -> bool {
        total >= self.ceiling
    }

    /// Likes given to a freshly added entry: the increment, or whatever is left.
    #[must_use]
    pub fn default_allocation(&self, total: u32, increment: u32) -> u32 {
        increment.min(self.headroom(total))
    }

    /// Evaluate setting `target`'s likes to `new_value`.
    ///
    /// Only the target is considered movable; other entries keep their
    /// values even when the ceiling is hit.
    #[must_use]
    pub fn propose_change(
        &self,
        entries: &[PostEntry],
        target: PostId,
        new_value: u32,
    ) -> QuotaDecision {
        let others_total = entries
            .iter()
            .filter(|e| e.id != target)
            .fold(0u32, |sum, e| sum.saturating_add(e.likes));

        if others_total.saturating_add(new_value) > self.ceiling {
            let available = self.headroom(others_total);
            tracing::warn!(
                post = %target,
                requested = new_value,
                available,
                "likes edit clamped to ceiling"
            );
            return QuotaDecision {
                value: available,
                total: others_total + available,
                error: Some(FormError::QuotaExceeded {
                    ceiling: self.ceiling,
                    available,
                }),
            };
        }

        QuotaDecision {
            value: new_value,
            total: others_total + new_value,
            error: None,
        }
    }
}

/// Coerce raw likes input to a count.
///
/// Reads an optional sign and the leading run of ASCII digits after any
/// leading whitespace; trailing garbage is ignored. Missing digits and
/// negative numbers give 0, oversized numbers saturate.
#[must_use]
pub fn parse_likes(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if negative || !seen_digit {
        0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, likes: u32) -> PostEntry {
        PostEntry {
            id: PostId(id),
            url: String::new(),
            likes,
        }
    }

    #[test]
    fn edit_within_ceiling_is_accepted() {
        let ledger = QuotaLedger::new(1000);
        let entries = vec![entry(1, 400), entry(2, 100)];
        let decision = ledger.propose_change(&entries, PostId(2), 600);
        assert_eq!(decision.value, 600);
        assert_eq!(decision.total, 1000);
        assert!(decision.error.is_none());
    }

    #[test]
    fn edit_past_ceiling_is_clamped() {
        let ledger = QuotaLedger::new(1000);
        let entries = vec![entry(1, 900), entry(2, 100)];
        let decision = ledger.propose_change(&entries, PostId(2), 300);
        assert_eq!(decision.value, 100);
        assert_eq!(decision.total, 1000);
        assert_eq!(
            decision.error,
            Some(FormError::QuotaExceeded {
                ceiling: 1000,
                available: 100
            })
        );
    }

    #[test]
    fn clamp_never_goes_negative() {
        // Others already sit at the ceiling; the target gets nothing.
        let ledger = QuotaLedger::new(500);
        let entries = vec![entry(1, 500), entry(2, 0)];
        let decision = ledger.propose_change(&entries, PostId(2), 50);
        assert_eq!(decision.value, 0);
        assert_eq!(decision.total, 500);
        assert!(decision.error.is_some());
    }

    #[test]
    fn default_allocation_respects_headroom() {
        let ledger = QuotaLedger::new(1000);
        assert_eq!(ledger.default_allocation(500, 100), 100);
        assert_eq!(ledger.default_allocation(950, 100), 50);
        assert_eq!(ledger.default_allocation(1000, 100), 0);
        assert!(ledger.is_exhausted(1000));
        assert!(!ledger.is_exhausted(999));
    }

    #[test]
    fn parse_likes_coerces_like_a_browser() {
        assert_eq!(parse_likes("300"), 300);
        assert_eq!(parse_likes("  42"), 42);
        assert_eq!(parse_likes("12abc"), 12);
        assert_eq!(parse_likes("+7"), 7);
        assert_eq!(parse_likes("-5"), 0);
        assert_eq!(parse_likes(""), 0);
        assert_eq!(parse_likes("abc"), 0);
        assert_eq!(parse_likes("99999999999999"), u32::MAX);
    }
}
