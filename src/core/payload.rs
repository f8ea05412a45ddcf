//! Wire payload for the form relay.
//!
//! The payload is an ordered list of form fields built once from the
//! session and handed to a transport unchanged.

use serde::Serialize;

use crate::config::FormConfig;
use crate::core::posts::{PostCollection, PostEntry};
use crate::core::session::ContactInfo;

/// Fixed parts of every relay payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadTemplate {
    /// `_subject` field.
    pub subject: String,
    /// `_template` field.
    pub template: String,
    /// Adds `_replyto` with the visitor's email.
    pub reply_to: bool,
    /// Adds `instagram_posts_json`.
    pub include_posts_json: bool,
    /// Code prefixed to each summary line.
    pub product_code: String,
    /// `formatted_output_label` field.
    pub output_label: String,
    /// `formatted_output_separator` field.
    pub output_separator: String,
}

impl From<&FormConfig> for PayloadTemplate {
    fn from(cfg: &FormConfig) -> Self {
        Self {
            subject: cfg.relay.subject.clone(),
            template: cfg.relay.template.clone(),
            reply_to: cfg.relay.reply_to,
            include_posts_json: cfg.relay.include_posts_json,
            product_code: cfg.product_code.clone(),
            output_label: cfg.relay.output_label.clone(),
            output_separator: cfg.relay.output_separator.clone(),
        }
    }
}

/// Immutable, ordered form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    fields: Vec<(String, String)>,
}

impl RelayPayload {
    /// Assemble the payload for a validated session.
    #[must_use]
    pub fn build(template: &PayloadTemplate, contact: &ContactInfo, posts: &PostCollection) -> Self {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(16 + posts.len() * 2);
        let mut push = |k: &str, v: String| fields.push((k.to_owned(), v));

        push("_subject", template.subject.clone());
        push("_template", template.template.clone());
        push("_captcha", "false".to_owned());
        push("_honey", String::new());
        if template.reply_to {
            push("_replyto", contact.email.clone());
        }

        push("name", contact.name.clone());
        push("email", contact.email.clone());
        push("phone", contact.phone.clone());

        for entry in posts.entries() {
            push(&format!("instagram_url_{}", entry.id), entry.url.clone());
            push(&format!("instagram_likes_{}", entry.id), entry.likes.to_string());
        }

        push("formatted_output_label", template.output_label.clone());
        push("formatted_output_separator", template.output_separator.clone());
        push(
            "formatted_output",
            formatted_output(&template.product_code, posts.entries()),
        );
        push("total_likes", posts.total().to_string());

        if template.include_posts_json {
            push("instagram_posts_json", posts_json(posts.entries()));
        }

        Self { fields }
    }

    /// Fields in wire order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One `"<code> | <url> | <likes>"` line per entry, newline separated.
#[must_use]
pub fn formatted_output(product_code: &str, entries: &[PostEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{product_code} | {} | {}", e.url, e.likes))
        .collect::<Vec<_>>()
        .join("\n")
}

fn posts_json(entries: &[PostEntry]) -> String {
    // Vec of plain structs with string/int fields cannot fail to serialize.
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_owned())
}
