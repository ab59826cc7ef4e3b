//! Field and form state as seen by subscribers.

use serde::Serialize;

/// Validation state of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    /// The field has been edited or blurred, or a submit was attempted.
    pub touched: bool,
    /// A debounced or in-flight async check is pending.
    pub validating: bool,
    /// Current error messages.
    pub errors: Vec<String>,
}

impl FieldMeta {
    /// Returns whether the field currently blocks submission.
    pub fn is_blocking(&self) -> bool {
        self.validating || !self.errors.is_empty()
    }

    /// Errors as rendered inline: only once touched, joined with ", ".
    pub fn visible_errors(&self) -> Option<String> {
        if self.touched && !self.errors.is_empty() {
            Some(self.errors.join(", "))
        } else {
            None
        }
    }
}

/// A field's value and meta at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    /// Field name.
    pub name: String,
    /// Current value.
    pub value: String,
    /// Validation state.
    pub meta: FieldMeta,
}

/// Immutable projection of a form controller's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    /// Fields in definition order.
    pub fields: Vec<FieldSnapshot>,
    /// No field has errors and none is validating.
    pub can_submit: bool,
    /// A submission is in flight.
    pub is_submitting: bool,
    /// Number of accepted submit calls.
    pub submission_attempts: u32,
}

impl FormSnapshot {
    /// Returns the snapshot of a field.
    pub fn field(&self, name: &str) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    /// Returns the errors of a field.
    pub fn errors(&self, name: &str) -> &[String] {
        self.field(name).map_or(&[], |f| f.meta.errors.as_slice())
    }

    /// Returns whether any field is validating.
    pub fn is_validating(&self) -> bool {
        self.fields.iter().any(|f| f.meta.validating)
    }
}
