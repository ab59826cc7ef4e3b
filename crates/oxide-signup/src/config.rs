//! Sign-up page configuration.

use std::time::Duration;

use oxide_forms::FormConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings of the sign-up page and its form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    /// Form controller settings (debounce, submit-time validation).
    pub form: FormConfig,
    /// Simulated latency of each async field check, in milliseconds.
    pub async_latency_ms: u64,
    /// Substring rejected by the async field checks.
    pub forbidden_substring: String,
    /// Target used when no redirect target is given.
    pub default_redirect: String,
    /// Form action path.
    pub action: String,
    /// Entry point of the Google sign-in flow.
    pub google_sign_in_path: String,
    /// Notification shown after a successful sign-up.
    pub success_message: String,
    /// Notification shown when a submission fails unexpectedly.
    /// `None` keeps such failures silent.
    pub unexpected_failure_message: Option<String>,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            form: FormConfig::default(),
            async_latency_ms: 1000,
            forbidden_substring: "error".to_string(),
            default_redirect: "/".to_string(),
            action: "/sign-up".to_string(),
            google_sign_in_path: "/sign-in/google".to_string(),
            success_message: "Signed Up Successfully! Explore Now!".to_string(),
            unexpected_failure_message: None,
        }
    }
}

impl SignupConfig {
    /// Parses a JSON configuration. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the async check latency as a `Duration`.
    pub const fn async_latency(&self) -> Duration {
        Duration::from_millis(self.async_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_form() {
        let config = SignupConfig::default();
        assert_eq!(config.form.debounce(), Duration::from_millis(300));
        assert_eq!(config.async_latency(), Duration::from_millis(1000));
        assert_eq!(config.default_redirect, "/");
        assert_eq!(config.unexpected_failure_message, None);
    }

    #[test]
    fn test_from_json_merges_defaults() {
        let config = SignupConfig::from_json(
            r#"{
                "form": {"debounce_ms": 100},
                "async_latency_ms": 0,
                "unexpected_failure_message": "Something went wrong"
            }"#,
        )
        .unwrap();

        assert_eq!(config.form.debounce_ms, 100);
        assert!(config.form.validate_on_submit);
        assert_eq!(config.async_latency_ms, 0);
        assert_eq!(config.forbidden_substring, "error");
        assert_eq!(
            config.unexpected_failure_message.as_deref(),
            Some("Something went wrong")
        );
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        assert!(SignupConfig::from_json(r#"{"async_latency_ms": "slow"}"#).is_err());
    }
}
