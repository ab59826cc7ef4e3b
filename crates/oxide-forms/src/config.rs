//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default debounce window applied before an async validator runs.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Settings shared by every field of a form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Debounce window in milliseconds for fields without their own.
    pub debounce_ms: u64,

    /// Re-run every validator when `submit` is accepted.
    pub validate_on_submit: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            validate_on_submit: true,
        }
    }
}

impl FormConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default debounce window.
    #[must_use]
    pub const fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Enables or disables submit-time validation.
    #[must_use]
    pub const fn validate_on_submit(mut self, enabled: bool) -> Self {
        self.validate_on_submit = enabled;
        self
    }

    /// Returns the debounce window as a `Duration`.
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.validate_on_submit);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FormConfig = serde_json::from_str(r#"{"debounce_ms": 50}"#).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert!(config.validate_on_submit);
    }
}
