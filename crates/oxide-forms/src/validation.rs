//! Form field validators.
//!
//! Synchronous validators run on every value change and short-circuit on the
//! first failure. Asynchronous validators run after the field's debounce
//! window and may suspend (remote lookups, simulated latency).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A boxed future for async validator operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;
}

/// Trait for validators that need to suspend before deciding.
pub trait AsyncValidator: Send + Sync {
    /// Validates a value and resolves to an error message if invalid.
    fn validate<'a>(&'a self, value: &'a str) -> BoxFuture<'a, Result<(), String>>;
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new `RequiredValidator` with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        // Whitespace counts as a value; only the empty string is missing.
        if value.is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a minimum length, counted in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator`.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new `MinLengthValidator` with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Async validator that rejects values containing a forbidden substring.
///
/// The check itself is immediate; `latency` stands in for the round trip an
/// external lookup would take and is awaited before deciding.
#[derive(Debug, Clone)]
pub struct ForbiddenSubstringValidator {
    needle: String,
    message: String,
    latency: Duration,
}

impl ForbiddenSubstringValidator {
    /// Creates a validator rejecting values that contain `needle`.
    pub fn new(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            message: message.into(),
            latency: Duration::ZERO,
        }
    }

    /// Sets the simulated latency awaited before each check.
    #[must_use]
    pub const fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

}

impl AsyncValidator for ForbiddenSubstringValidator {
    fn validate<'a>(&'a self, value: &'a str) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if value.contains(self.needle.as_str()) {
                Err(self.message.clone())
            } else {
                Ok(())
            }
        })
    }
}

/// Runs validators in order and returns the first failure.
pub fn first_error(validators: &[Box<dyn Validator>], value: &str) -> Option<String> {
    validators.iter().find_map(|v| v.validate(value).err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("   ").is_ok());
    }

    #[test]
    fn test_min_length_validator() {
        let v = MinLengthValidator::new(3);
        assert!(v.validate("Ali").is_ok());
        assert!(v.validate("Al").is_err());
        // Three characters, six bytes.
        assert!(v.validate("éàü").is_ok());
    }

    #[test]
    fn test_custom_messages() {
        let v = MinLengthValidator::with_message(6, "too short");
        assert_eq!(v.validate("abc"), Err("too short".to_string()));
    }

    #[test]
    fn test_first_error_short_circuits() {
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(RequiredValidator::with_message("required")),
            Box::new(MinLengthValidator::with_message(3, "short")),
        ];
        assert_eq!(first_error(&validators, ""), Some("required".to_string()));
        assert_eq!(first_error(&validators, "ab"), Some("short".to_string()));
        assert_eq!(first_error(&validators, "abc"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forbidden_substring_waits_for_latency() {
        let v = ForbiddenSubstringValidator::new("error", "no error")
            .latency(Duration::from_millis(1000));

        let start = tokio::time::Instant::now();
        assert_eq!(v.validate("an error here").await, Err("no error".into()));
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(v.validate("fine").await.is_ok());
    }
}
