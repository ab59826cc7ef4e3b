//! Bootstrap 5 rendering of form snapshots.
//!
//! Rendering is a pure function of field definitions and a [`FormSnapshot`];
//! subscribers re-render by calling these with each new snapshot.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div, Em};

use crate::field::FieldDef;
use crate::state::{FieldSnapshot, FormSnapshot};

/// Labels of the submit button.
#[derive(Debug, Clone, Copy)]
pub struct SubmitLabels<'a> {
    /// Shown while idle.
    pub idle: &'a str,
    /// Shown while a submission is in flight.
    pub busy: &'a str,
}

impl Default for SubmitLabels<'_> {
    fn default() -> Self {
        Self {
            idle: "Submit",
            busy: "Submitting...",
        }
    }
}

/// Renders one field: label, input, and inline errors once touched.
pub fn render_bootstrap_field(field: &FieldDef, state: &FieldSnapshot) -> String {
    let id = field
        .attrs
        .get("id")
        .cloned()
        .unwrap_or_else(|| field.name.clone());
    let visible_errors = state.meta.visible_errors();

    let mut attrs = field.attrs.clone();
    attrs.set("id", &id);
    if visible_errors.is_some() {
        let current_class = attrs.get("class").cloned().unwrap_or_default();
        attrs.set("class", format!("{current_class} is-invalid").trim());
    }

    let widget_html = field.widget.render(&field.name, Some(&state.value), &attrs);

    let label_text = field.label.clone();
    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .when(state.meta.validating, |d| d.attr("aria-busy", "true"))
        .child::<Div, _>(|d| {
            let d = d.class("form-text text-danger small");
            match &visible_errors {
                Some(errors) => d.child::<Em, _>(|em| em.text(errors.as_str())),
                None => d,
            }
        })
        .render()
}

/// Renders the submit button, disabled while the form cannot submit.
pub fn render_submit_button(snapshot: &FormSnapshot, labels: SubmitLabels<'_>) -> String {
    let label = if snapshot.is_submitting {
        labels.busy
    } else {
        labels.idle
    };

    html! { div.class("d-flex justify-content-center pt-2") }
        .child::<Button, _>(|b| {
            b.attr("type", "submit")
                .class("btn btn-primary w-100")
                .when(!snapshot.can_submit, |b| b.attr("disabled", "disabled"))
                .text(label)
        })
        .render()
}

/// Renders a complete form from its definitions and a snapshot.
pub fn render_bootstrap_form(
    fields: &[FieldDef],
    snapshot: &FormSnapshot,
    action: &str,
    labels: SubmitLabels<'_>,
) -> String {
    let mut form = html! {
        form.action(#action).method("post").class("needs-validation")
    };

    for field in fields {
        if let Some(state) = snapshot.field(&field.name) {
            let field_html = render_bootstrap_field(field, state);
            form = form.child::<Div, _>(|d| d.raw(&field_html));
        }
    }

    let button_html = render_submit_button(snapshot, labels);
    form.child::<Div, _>(|d| d.raw(&button_html)).render()
}

/// Wraps rendered markup in a Bootstrap card body.
pub fn card(body: &str) -> String {
    let wrapper: Element<Div> = html! { div.class("card rounded-3 bg-white") };
    wrapper
        .child::<Div, _>(|d| d.class("card-body").raw(body))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldMeta;
    use crate::widgets::BootstrapTextInput;

    fn state(value: &str, touched: bool, errors: &[&str]) -> FieldSnapshot {
        FieldSnapshot {
            name: "firstName".into(),
            value: value.into(),
            meta: FieldMeta {
                touched,
                validating: false,
                errors: errors.iter().map(ToString::to_string).collect(),
            },
        }
    }

    fn field() -> FieldDef {
        FieldDef::new("firstName", "First Name")
            .widget(BootstrapTextInput::new().placeholder("First Name"))
    }

    #[test]
    fn test_render_field_no_errors() {
        let html = render_bootstrap_field(&field(), &state("Alice", true, &[]));
        assert!(html.contains("form-label"));
        assert!(html.contains("First Name"));
        assert!(html.contains(r#"value="Alice""#));
        assert!(!html.contains("is-invalid"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_untouched_errors_are_hidden() {
        let html = render_bootstrap_field(&field(), &state("Al", false, &["too short"]));
        assert!(!html.contains("too short"));
        assert!(!html.contains("is-invalid"));
    }

    #[test]
    fn test_touched_errors_are_joined() {
        let html = render_bootstrap_field(&field(), &state("x", true, &["one", "two"]));
        assert!(html.contains("is-invalid"));
        assert!(html.contains("one, two"));
    }

    #[test]
    fn test_submit_button_states() {
        let mut snapshot = FormSnapshot {
            fields: Vec::new(),
            can_submit: true,
            is_submitting: false,
            submission_attempts: 0,
        };
        let labels = SubmitLabels {
            idle: "Sign up",
            busy: "Signing up...",
        };

        let idle = render_submit_button(&snapshot, labels);
        assert!(idle.contains("Sign up"));
        assert!(!idle.contains("disabled"));

        snapshot.can_submit = false;
        snapshot.is_submitting = true;
        let busy = render_submit_button(&snapshot, labels);
        assert!(busy.contains("Signing up..."));
        assert!(busy.contains("disabled"));
    }

    #[test]
    fn test_render_form_includes_every_field() {
        let fields = vec![field(), FieldDef::new("lastName", "Last Name")];
        let snapshot = FormSnapshot {
            fields: vec![
                state("Alice", false, &[]),
                FieldSnapshot {
                    name: "lastName".into(),
                    value: "Lee".into(),
                    meta: FieldMeta::default(),
                },
            ],
            can_submit: true,
            is_submitting: false,
            submission_attempts: 0,
        };

        let html = render_bootstrap_form(&fields, &snapshot, "/sign-up", SubmitLabels::default());
        assert!(html.contains(r#"action="/sign-up""#));
        assert!(html.contains(r#"value="Alice""#));
        assert!(html.contains(r#"value="Lee""#));
        assert!(html.contains("Submit"));
        assert!(card(&html).contains("card-body"));
    }
}
