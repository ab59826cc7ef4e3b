//! Sign-up field definitions.

use oxide_forms::validation::{
    ForbiddenSubstringValidator, MinLengthValidator, RequiredValidator,
};
use oxide_forms::widgets::BootstrapTextInput;
use oxide_forms::{FieldDef, FormBuilder};

use crate::config::SignupConfig;

/// First name field.
pub const FIRST_NAME: &str = "firstName";
/// Last name field.
pub const LAST_NAME: &str = "lastName";
/// Email field.
pub const EMAIL: &str = "email";
/// Password field.
pub const PASSWORD: &str = "password";

/// Builds the four sign-up fields.
///
/// Every field carries the forbidden-substring check with the configured
/// latency. The email field has no blur binding, so its errors never show
/// inline.
pub fn signup_fields(config: &SignupConfig) -> Vec<FieldDef> {
    let needle = config.forbidden_substring.as_str();
    let forbidden = |message: String| {
        ForbiddenSubstringValidator::new(needle, message).latency(config.async_latency())
    };

    FormBuilder::new()
        .field(
            FieldDef::new(FIRST_NAME, "First Name")
                .validator(RequiredValidator::with_message("First Name is required"))
                .validator(MinLengthValidator::with_message(
                    3,
                    "First name must be at least 3 characters",
                ))
                .async_validator(forbidden(format!(
                    r#"No "{needle}" allowed in first name"#
                )))
                .widget(
                    BootstrapTextInput::new()
                        .placeholder("First Name")
                        .autocomplete("given-name"),
                ),
        )
        .field(
            FieldDef::new(LAST_NAME, "Last Name")
                .validator(RequiredValidator::with_message("Last Name is required"))
                .async_validator(forbidden(format!(r#"No "{needle}" allowed in last name"#)))
                .widget(
                    BootstrapTextInput::new()
                        .placeholder("Last Name")
                        .autocomplete("family-name"),
                ),
        )
        .field(
            FieldDef::new(EMAIL, "Email")
                .validator(RequiredValidator::with_message("Email is required"))
                .async_validator(forbidden("Email must be valid".to_string()))
                .touch_on_blur(false)
                .widget(
                    BootstrapTextInput::email()
                        .placeholder("example@nith.ac.in")
                        .autocomplete("email"),
                ),
        )
        .field(
            FieldDef::new(PASSWORD, "Password")
                .validator(RequiredValidator::with_message("Password required"))
                .validator(MinLengthValidator::with_message(
                    6,
                    "Password must contain at least 6 characters",
                ))
                .async_validator(forbidden(format!(r#"No "{needle}" allowed in password"#)))
                .widget(
                    BootstrapTextInput::password()
                        .placeholder("********")
                        .autocomplete("new-password"),
                ),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use oxide_forms::validation::first_error;

    use super::*;

    fn field<'a>(fields: &'a [FieldDef], name: &str) -> &'a FieldDef {
        fields.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn test_field_order() {
        let fields = signup_fields(&SignupConfig::default());
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, [FIRST_NAME, LAST_NAME, EMAIL, PASSWORD]);
    }

    #[test]
    fn test_required_messages() {
        let fields = signup_fields(&SignupConfig::default());
        let cases = [
            (FIRST_NAME, "First Name is required"),
            (LAST_NAME, "Last Name is required"),
            (EMAIL, "Email is required"),
            (PASSWORD, "Password required"),
        ];
        for (name, message) in cases {
            let def = field(&fields, name);
            assert_eq!(first_error(&def.validators, "").as_deref(), Some(message));
        }
    }

    #[test]
    fn test_length_rules() {
        let fields = signup_fields(&SignupConfig::default());
        let first = field(&fields, FIRST_NAME);
        assert_eq!(
            first_error(&first.validators, "Al").as_deref(),
            Some("First name must be at least 3 characters")
        );
        assert_eq!(first_error(&first.validators, "Ali"), None);

        let password = field(&fields, PASSWORD);
        assert_eq!(
            first_error(&password.validators, "12345").as_deref(),
            Some("Password must contain at least 6 characters")
        );
        assert_eq!(first_error(&password.validators, "123456"), None);

        // email format is left to the backend
        let email = field(&fields, EMAIL);
        assert_eq!(first_error(&email.validators, "not-an-email"), None);
    }

    #[test]
    fn test_email_ignores_blur() {
        let fields = signup_fields(&SignupConfig::default());
        assert!(!field(&fields, EMAIL).touch_on_blur);
        assert!(field(&fields, FIRST_NAME).touch_on_blur);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_messages_follow_needle() {
        let config = SignupConfig {
            forbidden_substring: "spam".into(),
            ..SignupConfig::default()
        };
        let fields = signup_fields(&config);

        let last = field(&fields, LAST_NAME).async_validator.clone().unwrap();
        assert_eq!(
            last.validate("spammy").await,
            Err(r#"No "spam" allowed in last name"#.to_string())
        );
        assert_eq!(last.validate("error").await, Ok(()));

        let email = field(&fields, EMAIL).async_validator.clone().unwrap();
        assert_eq!(
            email.validate("spam@b.com").await,
            Err("Email must be valid".to_string())
        );
    }
}
