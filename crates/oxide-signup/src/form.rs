//! The sign-up form: a form controller wired to the auth and notification
//! collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use oxide_auth::{AuthClient, SignUpRequest, User};
use oxide_forms::render::{render_bootstrap_form, SubmitLabels};
use oxide_forms::{FormController, FormSnapshot, SubmitOutcome, Subscription, ValidationErrors};
use oxide_router::url::decode_component;
use tracing::{debug, info, warn};

use crate::config::SignupConfig;
use crate::error::{Result, SignupError};
use crate::fields::{signup_fields, EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use crate::notify::Notifier;

/// Labels of the sign-up button.
pub const SUBMIT_LABELS: SubmitLabels<'static> = SubmitLabels {
    idle: "Sign up",
    busy: "Signing up...",
};

/// Result of [`SignupForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Fields have errors, checks are pending or a submission is in flight.
    /// Nothing was sent.
    NotAllowed,
    /// Submit-time validation failed. Nothing was sent.
    Invalid(ValidationErrors),
    /// The account was created.
    SignedUp(User),
    /// The backend refused the sign-up; the user was notified.
    Rejected(String),
    /// The attempt failed unexpectedly. The failure was logged.
    Aborted,
}

/// A mounted sign-up form.
pub struct SignupForm {
    controller: FormController,
    auth: Arc<dyn AuthClient>,
    notifier: Arc<dyn Notifier>,
    redirect_url: Option<String>,
    config: Arc<SignupConfig>,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("controller", &self.controller)
            .field("redirect_url", &self.redirect_url)
            .finish_non_exhaustive()
    }
}

impl SignupForm {
    /// Builds the form. Must be called inside a Tokio runtime.
    pub fn new(
        config: Arc<SignupConfig>,
        auth: Arc<dyn AuthClient>,
        notifier: Arc<dyn Notifier>,
        redirect_url: Option<String>,
    ) -> Result<Self> {
        let controller = FormController::new(signup_fields(&config), config.form.clone())?;
        Ok(Self {
            controller,
            auth,
            notifier,
            redirect_url,
            config,
        })
    }

    /// Returns the underlying controller.
    pub const fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Returns the pending redirect target, as given.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Sets a field without touching it.
    pub fn set_value(&self, field: &str, value: impl Into<String>) -> Result<()> {
        Ok(self.controller.set_value(field, value)?)
    }

    /// Handles user input on a field: it becomes touched and is validated,
    /// so its errors show inline.
    pub fn handle_change(&self, field: &str, value: impl Into<String>) -> Result<()> {
        Ok(self.controller.handle_change(field, value)?)
    }

    /// Handles a blur event on a field.
    pub fn handle_blur(&self, field: &str) -> Result<()> {
        Ok(self.controller.handle_blur(field)?)
    }

    /// Registers a re-render callback.
    pub fn subscribe(
        &self,
        listener: impl Fn(&FormSnapshot) + Send + Sync + 'static,
    ) -> Subscription {
        self.controller.subscribe(listener)
    }

    /// Waits until no field check is pending.
    pub async fn settled(&self) {
        self.controller.settled().await;
    }

    /// Returns the current state.
    pub fn snapshot(&self) -> FormSnapshot {
        self.controller.snapshot()
    }

    /// Renders the form markup for the current state.
    pub fn render(&self) -> String {
        render_bootstrap_form(
            self.controller.fields(),
            &self.controller.snapshot(),
            &self.config.action,
            SUBMIT_LABELS,
        )
    }

    /// Submits the form to the auth collaborator.
    ///
    /// Values are left untouched whatever the outcome, so a refused form can
    /// be corrected and sent again.
    pub async fn submit(&self) -> SignupOutcome {
        match self.controller.submit(|values| self.sign_up(values)).await {
            SubmitOutcome::NotAllowed => SignupOutcome::NotAllowed,
            SubmitOutcome::Invalid(errors) => SignupOutcome::Invalid(errors),
            SubmitOutcome::Completed(outcome) => outcome,
            SubmitOutcome::Failed(_) => {
                if let Some(message) = &self.config.unexpected_failure_message {
                    self.notifier.error(message);
                }
                SignupOutcome::Aborted
            }
        }
    }

    async fn sign_up(&self, values: HashMap<String, String>) -> Result<SignupOutcome> {
        let request = self.request(&values)?;
        debug!(email = %request.email, callback_url = %request.callback_url, "signing up");

        match self.auth.sign_up_email(&request).await {
            Ok(response) => {
                info!(user = %response.user.id, "signed up");
                self.notifier.success(&self.config.success_message);
                Ok(SignupOutcome::SignedUp(response.user))
            }
            Err(e) => {
                let Some(message) = e.reported_message().map(str::to_string) else {
                    return Err(SignupError::Auth(e));
                };
                warn!(error = %e, "sign-up refused");
                self.notifier.error(&message);
                Ok(SignupOutcome::Rejected(message))
            }
        }
    }

    fn request(&self, values: &HashMap<String, String>) -> Result<SignUpRequest> {
        let value = |name: &str| values.get(name).cloned().unwrap_or_default();
        let target = self
            .redirect_url
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.config.default_redirect);

        Ok(SignUpRequest {
            email: value(EMAIL),
            password: value(PASSWORD),
            name: format!("{} {}", value(FIRST_NAME), value(LAST_NAME)),
            callback_url: decode_component(target)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use oxide_auth::{AuthError, BoxFuture, SignUpResponse};

    use super::*;
    use crate::notify::{Notification, RecordingNotifier};

    struct Refusing;

    impl AuthClient for Refusing {
        fn sign_up_email<'a>(
            &'a self,
            _request: &'a SignUpRequest,
        ) -> BoxFuture<'a, oxide_auth::Result<SignUpResponse>> {
            Box::pin(async { Err(AuthError::Transport("connection reset".into())) })
        }
    }

    fn config() -> Arc<SignupConfig> {
        Arc::new(SignupConfig {
            async_latency_ms: 0,
            ..SignupConfig::default()
        })
    }

    fn fill(form: &SignupForm) {
        form.set_value(FIRST_NAME, "Alice").unwrap();
        form.set_value(LAST_NAME, "Lee").unwrap();
        form.set_value(EMAIL, "a@b.com").unwrap();
        form.set_value(PASSWORD, "secret123").unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_joins_names_and_decodes_target() {
        let form = SignupForm::new(
            config(),
            Arc::new(Refusing),
            Arc::new(RecordingNotifier::new()),
            Some("%2Fdashboard%3Ftab%3D1".into()),
        )
        .unwrap();
        fill(&form);

        let request = form.request(&form.controller.values()).unwrap();
        assert_eq!(request.name, "Alice Lee");
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.callback_url, "/dashboard?tab=1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_defaults_target() {
        let form = SignupForm::new(
            config(),
            Arc::new(Refusing),
            Arc::new(RecordingNotifier::new()),
            Some(String::new()),
        )
        .unwrap();

        let request = form.request(&HashMap::new()).unwrap();
        assert_eq!(request.callback_url, "/");
        assert_eq!(request.name, " ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_failure_is_silent_by_default() {
        let notifier = Arc::new(RecordingNotifier::new());
        let form =
            SignupForm::new(config(), Arc::new(Refusing), notifier.clone(), None).unwrap();
        fill(&form);
        form.settled().await;

        assert_eq!(form.submit().await, SignupOutcome::Aborted);
        assert!(notifier.notifications().is_empty());
        assert!(!form.snapshot().is_submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_failure_message_is_configurable() {
        let config = Arc::new(SignupConfig {
            async_latency_ms: 0,
            unexpected_failure_message: Some("Something went wrong".into()),
            ..SignupConfig::default()
        });
        let notifier = Arc::new(RecordingNotifier::new());
        let form = SignupForm::new(config, Arc::new(Refusing), notifier.clone(), None).unwrap();
        fill(&form);
        form.settled().await;

        assert_eq!(form.submit().await, SignupOutcome::Aborted);
        assert_eq!(
            notifier.notifications(),
            vec![Notification::Error("Something went wrong".into())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_undecodable_target_aborts() {
        let notifier = Arc::new(RecordingNotifier::new());
        let form = SignupForm::new(
            config(),
            Arc::new(Refusing),
            notifier.clone(),
            Some("%E0%A4%A".into()),
        )
        .unwrap();
        fill(&form);
        form.settled().await;

        assert_eq!(form.submit().await, SignupOutcome::Aborted);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_uses_sign_up_labels() {
        let form = SignupForm::new(
            config(),
            Arc::new(Refusing),
            Arc::new(RecordingNotifier::new()),
            None,
        )
        .unwrap();
        form.handle_change(FIRST_NAME, "Al").unwrap();

        let html = form.render();
        assert!(html.contains("Sign up"));
        assert!(html.contains("disabled"));
        assert!(html.contains("First name must be at least 3 characters"));
        assert!(html.contains(r#"placeholder="example@nith.ac.in""#));
        assert!(html.contains(r#"type="password""#));
    }
}
