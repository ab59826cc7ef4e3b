//! Error types for forms.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The field name is not part of the form definition.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Two field definitions share a name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// The controller was created outside a Tokio runtime.
    #[error("form controller requires a running Tokio runtime")]
    NoRuntime,
}

/// Collection of validation errors by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collects_by_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("password", "Password required");
        errors.add("email", "Email is required");
        errors.add("password", "too weak");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("password").map(Vec::len), Some(2));
        assert_eq!(errors.all_errors().len(), 3);
        assert_eq!(
            errors.to_string(),
            "email: Email is required\npassword: Password required\npassword: too weak\n"
        );
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(
            FormError::UnknownField("nickname".into()).to_string(),
            "unknown field: nickname"
        );
    }
}
