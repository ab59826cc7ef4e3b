//! Field definitions.

use std::sync::Arc;
use std::time::Duration;

use crate::validation::{AsyncValidator, Validator};
use crate::widgets::{BootstrapTextInput, Widget, WidgetAttrs};

/// Definition of a form field: how it validates and how it renders.
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Synchronous validators, run in order on every change.
    pub validators: Vec<Box<dyn Validator>>,
    /// Async validator, run after the debounce window.
    pub async_validator: Option<Arc<dyn AsyncValidator>>,
    /// Per-field debounce window; falls back to the form default.
    pub async_debounce: Option<Duration>,
    /// Whether blur events mark the field as touched.
    pub touch_on_blur: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
}

impl std::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("validators", &self.validators.len())
            .field("async_validator", &self.async_validator.is_some())
            .field("async_debounce", &self.async_debounce)
            .field("touch_on_blur", &self.touch_on_blur)
            .finish_non_exhaustive()
    }
}

impl FieldDef {
    /// Creates a new text field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            validators: Vec::new(),
            async_validator: None,
            async_debounce: None,
            touch_on_blur: true,
            widget: Box::new(BootstrapTextInput::new()),
            attrs: WidgetAttrs::new(),
        }
    }

    /// Adds a synchronous validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Sets the async validator.
    #[must_use]
    pub fn async_validator(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.async_validator = Some(Arc::new(validator));
        self
    }

    /// Overrides the debounce window for this field.
    #[must_use]
    pub const fn async_debounce(mut self, debounce: Duration) -> Self {
        self.async_debounce = Some(debounce);
        self
    }

    /// Controls whether blur events mark the field as touched.
    #[must_use]
    pub const fn touch_on_blur(mut self, enabled: bool) -> Self {
        self.touch_on_blur = enabled;
        self
    }

    /// Sets the widget.
    #[must_use]
    pub fn widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widget = Box::new(widget);
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }
}

/// A simple form builder for declaring fields in order.
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDef>,
}

impl FormBuilder {
    /// Creates a new form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field definitions.
    pub fn build(self) -> Vec<FieldDef> {
        self.fields
    }
}
