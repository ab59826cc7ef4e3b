//! Bootstrap 5 form widgets.

use super::{html_escape, Widget, WidgetAttrs};

/// Bootstrap 5 `<input>` widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, email, password).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Autofill hint.
    pub autocomplete: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self::typed("text")
    }
}

impl BootstrapTextInput {
    fn typed(input_type: &str) -> Self {
        Self {
            input_type: input_type.to_string(),
            placeholder: None,
            autocomplete: None,
        }
    }

    /// Creates a text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::typed("password")
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::typed("email")
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the autofill hint.
    #[must_use]
    pub fn autocomplete(mut self, hint: impl Into<String>) -> Self {
        self.autocomplete = Some(hint.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let class = match attrs.get("class") {
            Some(extra) => format!("form-control {extra}"),
            None => "form-control".to_string(),
        };
        let id = attrs.get("id").map_or(name, String::as_str);

        let mut pairs: Vec<(&str, &str)> = vec![
            ("type", self.input_type.as_str()),
            ("class", class.as_str()),
            ("id", id),
            ("name", name),
            ("value", value.unwrap_or_default()),
        ];
        if let Some(placeholder) = &self.placeholder {
            pairs.push(("placeholder", placeholder.as_str()));
        }
        if let Some(hint) = &self.autocomplete {
            pairs.push(("autocomplete", hint.as_str()));
        }
        pairs.extend(
            attrs
                .attrs
                .iter()
                .filter(|(k, _)| !matches!(k.as_str(), "class" | "id"))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        let rendered: String = pairs
            .iter()
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect();
        format!("<input{rendered}>")
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}
