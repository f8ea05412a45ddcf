//! Form and relay configuration structures.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, UrlPolicy};

/// How the payload reaches the relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Form-encoded POST following the relay's redirect flow.
    #[default]
    Navigate,
    /// Multipart POST whose response is not inspected.
    Fetch,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "navigate" => Ok(Self::Navigate),
            "fetch" => Ok(Self::Fetch),
            other => Err(format!("unknown transport mode `{other}`")),
        }
    }
}

/// Relay endpoint and payload options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Relay URL the form posts to.
    pub endpoint: String,
    /// Transport selection.
    pub transport: TransportMode,
    /// `_subject` of the relayed email.
    pub subject: String,
    /// `_template` layout requested from the relay.
    pub template: String,
    /// Send `_replyto` with the visitor's email.
    pub reply_to: bool,
    /// Send the full entry list as JSON.
    pub include_posts_json: bool,
    /// Label placed above the summary in the email.
    pub output_label: String,
    /// Separator placed between label and summary.
    pub output_separator: String,
    /// Optional client timeout in seconds; none by default.
    pub timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://formsubmit.co/info@instaboost.nl".into(),
            transport: TransportMode::Navigate,
            subject: "Nieuwe gratis bestelling via contactformulier".into(),
            template: "table".into(),
            reply_to: false,
            include_posts_json: true,
            output_label: "KOPIEER ONDERSTAANDE TEKST VOOR BULK BESTELLING:".into(),
            output_separator: "----------------------------------------".into(),
            timeout_secs: None,
        }
    }
}

/// Form configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum total likes per session.
    pub ceiling: u32,
    /// Likes on the initial post.
    pub default_likes: u32,
    /// Likes given to each added post, if available.
    pub default_increment: u32,
    /// Code prefixed to each summary line.
    pub product_code: String,
    /// Whether malformed URLs block submission.
    pub url_policy: UrlPolicy,
    /// Relay settings.
    pub relay: RelayConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            ceiling: 1000,
            default_likes: 500,
            default_increment: 100,
            product_code: "7160".into(),
            url_policy: UrlPolicy::Advisory,
            relay: RelayConfig::default(),
        }
    }
}

impl FormConfig {
    /// Defaults with a different ceiling. Observed deployments use 500, 1000 and 2500.
    #[must_use]
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            ceiling,
            default_likes: ceiling.min(500),
            ..Self::default()
        }
    }

    /// Set the initial post's likes.
    #[must_use]
    pub const fn with_default_likes(mut self, likes: u32) -> Self {
        self.default_likes = likes;
        self
    }

    /// Set the per-add increment.
    #[must_use]
    pub const fn with_default_increment(mut self, increment: u32) -> Self {
        self.default_increment = increment;
        self
    }

    /// Set the URL policy.
    #[must_use]
    pub const fn with_url_policy(mut self, policy: UrlPolicy) -> Self {
        self.url_policy = policy;
        self
    }

    /// Set the relay endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.relay.endpoint = endpoint.into();
        self
    }

    /// Set the transport mode.
    #[must_use]
    pub const fn with_transport(mut self, mode: TransportMode) -> Self {
        self.relay.transport = mode;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Describes the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.ceiling == 0 {
            return Err("ceiling must be greater than 0".into());
        }
        if self.default_likes > self.ceiling {
            return Err(format!(
                "default_likes ({}) must not exceed ceiling ({})",
                self.default_likes, self.ceiling
            ));
        }
        if self.default_increment == 0 {
            return Err("default_increment must be greater than 0".into());
        }
        if self.product_code.trim().is_empty() {
            return Err("product_code must not be empty".into());
        }
        let endpoint = self.relay.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(format!("relay endpoint `{endpoint}` must be an http(s) URL"));
        }
        if self.relay.timeout_secs == Some(0) {
            return Err("relay timeout_secs must be greater than 0 when set".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `.env` if present, then overlay `LIKES_FORM_*` variables on the defaults.
    ///
    /// # Errors
    ///
    /// A variable that does not parse, or an invalid result.
    pub fn from_env() -> AppResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Overlay variables from `lookup` on the defaults.
    ///
    /// # Errors
    ///
    /// A variable that does not parse, or an invalid result.
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let ceiling_set = lookup("LIKES_FORM_CEILING").is_some();

        load(&lookup, "LIKES_FORM_CEILING", &mut cfg.ceiling)?;
        if ceiling_set {
            cfg.default_likes = cfg.default_likes.min(cfg.ceiling);
        }
        load(&lookup, "LIKES_FORM_DEFAULT_LIKES", &mut cfg.default_likes)?;
        load(&lookup, "LIKES_FORM_DEFAULT_INCREMENT", &mut cfg.default_increment)?;
        load(&lookup, "LIKES_FORM_PRODUCT_CODE", &mut cfg.product_code)?;
        load(&lookup, "LIKES_FORM_RELAY_ENDPOINT", &mut cfg.relay.endpoint)?;
        load(&lookup, "LIKES_FORM_TRANSPORT", &mut cfg.relay.transport)?;
        load(&lookup, "LIKES_FORM_SUBJECT", &mut cfg.relay.subject)?;
        load(&lookup, "LIKES_FORM_REPLY_TO", &mut cfg.relay.reply_to)?;
        load(&lookup, "LIKES_FORM_POSTS_JSON", &mut cfg.relay.include_posts_json)?;
        if let Some(raw) = lookup("LIKES_FORM_STRICT_URLS") {
            let strict: bool = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid LIKES_FORM_STRICT_URLS value `{raw}`"))?;
            cfg.url_policy = if strict {
                UrlPolicy::Strict
            } else {
                UrlPolicy::Advisory
            };
        }
        if let Some(raw) = lookup("LIKES_FORM_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid LIKES_FORM_TIMEOUT_SECS value `{raw}`"))?;
            cfg.relay.timeout_secs = Some(secs);
        }

        cfg.validate().map_err(|e| anyhow::anyhow!("config invalid: {e}"))?;
        Ok(cfg)
    }
}

fn load<F, T>(lookup: &F, key: &str, slot: &mut T) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        tracing::debug!("{key} not set, keeping default");
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {key} value `{raw}`: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(FormConfig::default().validate().is_ok());
        for ceiling in [500, 1000, 2500] {
            assert!(FormConfig::with_ceiling(ceiling).validate().is_ok());
        }
    }

    #[test]
    fn env_overlay() {
        let cfg = FormConfig::from_vars(vars(&[
            ("LIKES_FORM_CEILING", "2500"),
            ("LIKES_FORM_TRANSPORT", "fetch"),
            ("LIKES_FORM_REPLY_TO", "true"),
            ("LIKES_FORM_STRICT_URLS", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.ceiling, 2500);
        assert_eq!(cfg.relay.transport, TransportMode::Fetch);
        assert!(cfg.relay.reply_to);
        assert_eq!(cfg.url_policy, UrlPolicy::Strict);
    }

    #[test]
    fn small_ceiling_pulls_default_likes_down() {
        let cfg = FormConfig::from_vars(vars(&[("LIKES_FORM_CEILING", "300")])).unwrap();
        assert_eq!(cfg.default_likes, 300);
    }

    #[test]
    fn json_with_partial_keys() {
        let cfg = FormConfig::from_json_str(
            r#"{"ceiling": 2500, "relay": {"transport": "fetch", "timeout_secs": 10}}"#,
        )
        .unwrap();
        assert_eq!(cfg.ceiling, 2500);
        assert_eq!(cfg.product_code, "7160");
        assert_eq!(cfg.relay.transport, TransportMode::Fetch);
        assert_eq!(cfg.relay.timeout_secs, Some(10));

        let err = FormConfig::from_json_str(r#"{"default_likes": 5000}"#).unwrap_err();
        assert!(err.contains("default_likes"));
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = FormConfig::from_vars(vars(&[("LIKES_FORM_CEILING", "lots")])).unwrap_err();
        assert!(err.to_string().contains("LIKES_FORM_CEILING"));
    }
}
