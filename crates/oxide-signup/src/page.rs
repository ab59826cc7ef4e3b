//! The sign-up page: session guard, form and surrounding markup.

use std::sync::Arc;

use ironhtml::html;
use ironhtml_elements::{Div, Hr, Span};
use oxide_auth::{AuthClient, SessionProvider};
use oxide_forms::render::card;
use oxide_router::{sign_in_href, Navigator, Request, Response, REDIRECT_PARAM};
use tracing::{debug, info, warn};

use crate::config::SignupConfig;
use crate::error::Result;
use crate::form::{SignupForm, SignupOutcome};
use crate::notify::Notifier;

/// Services the page talks to.
#[derive(Clone)]
pub struct Collaborators {
    /// Creates accounts.
    pub auth: Arc<dyn AuthClient>,
    /// Knows whether the visitor is signed in.
    pub sessions: Arc<dyn SessionProvider>,
    /// Performs redirects.
    pub navigator: Arc<dyn Navigator>,
    /// Shows toasts.
    pub notifier: Arc<dyn Notifier>,
}

/// Result of mounting the page.
#[derive(Debug)]
pub enum MountOutcome {
    /// A session already existed; the visitor was sent to this path.
    Redirected(String),
    /// The form was built and should be rendered.
    Render(SignupForm),
}

impl MountOutcome {
    /// Returns the form if the page rendered.
    pub fn into_form(self) -> Option<SignupForm> {
        match self {
            Self::Render(form) => Some(form),
            Self::Redirected(_) => None,
        }
    }
}

/// The sign-up page host.
pub struct SignupPage {
    config: Arc<SignupConfig>,
    collaborators: Collaborators,
}

impl SignupPage {
    /// Creates a page.
    pub fn new(config: SignupConfig, collaborators: Collaborators) -> Self {
        Self {
            config: Arc::new(config),
            collaborators,
        }
    }

    /// Returns the page configuration.
    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    /// Mounts the page for a visitor.
    ///
    /// Signed-in visitors are redirected to `redirect_url` (or the default
    /// target) and no form is built.
    pub async fn mount(&self, redirect_url: Option<&str>) -> Result<MountOutcome> {
        if let Some(path) = self.redirect_if_signed_in(redirect_url).await {
            return Ok(MountOutcome::Redirected(path));
        }

        let form = SignupForm::new(
            Arc::clone(&self.config),
            Arc::clone(&self.collaborators.auth),
            Arc::clone(&self.collaborators.notifier),
            redirect_url.map(str::to_string),
        )?;
        debug!(redirect_url, "sign-up form mounted");
        Ok(MountOutcome::Render(form))
    }

    /// Mounts the page for a request, reading the target from its query.
    pub async fn mount_request(&self, request: &Request) -> Result<MountOutcome> {
        self.mount(request.get_query(REDIRECT_PARAM)).await
    }

    /// Answers a page request: a redirect for signed-in visitors, the
    /// rendered page otherwise.
    pub async fn respond(&self, request: &Request) -> Result<Response> {
        Ok(match self.mount_request(request).await? {
            MountOutcome::Redirected(path) => Response::redirect(path),
            MountOutcome::Render(form) => Response::html(self.render(&form)),
        })
    }

    /// Submits the form, then leaves the page if the sign-up opened a
    /// session.
    pub async fn submit(&self, form: &SignupForm) -> SignupOutcome {
        let outcome = form.submit().await;
        if matches!(outcome, SignupOutcome::SignedUp(_)) {
            self.redirect_if_signed_in(form.redirect_url()).await;
        }
        outcome
    }

    /// Renders the whole page around the form.
    pub fn render(&self, form: &SignupForm) -> String {
        let sign_in = self.collaborators.navigator.sign_in_href(form.redirect_url());
        let google = sign_in_href(&self.config.google_sign_in_path, form.redirect_url());
        let form_html = form.render();

        let header = html! {
            div.class("text-center mb-4") {
                h2.class("h3 fw-bold") { "Create your account" }
                p.class("text-muted") {
                    "Already have an account? "
                    a.href(#sign_in).class("link-primary") { "Sign in" }
                }
            }
        };

        let divider = html! { div.class("d-flex align-items-center my-3") }
            .child::<Hr, _>(|hr| hr.class("flex-grow-1"))
            .child::<Span, _>(|s| s.class("px-2 text-muted small").text("OR"))
            .child::<Hr, _>(|hr| hr.class("flex-grow-1"));

        let google_link = html! {
            a.href(#google).class("btn btn-outline-secondary w-100") { "Sign in with Google" }
        };

        let body = html! { div.class("container py-5") }
            .child::<Div, _>(|d| {
                d.class("mx-auto")
                    .attr("style", "max-width: 28rem")
                    .raw(header.render())
                    .raw(&form_html)
                    .raw(divider.render())
                    .raw(google_link.render())
            })
            .render();
        card(&body)
    }

    async fn redirect_if_signed_in(&self, redirect_url: Option<&str>) -> Option<String> {
        match self.collaborators.sessions.current_session().await {
            Ok(Some(session)) => {
                let target = redirect_url
                    .filter(|r| !r.is_empty())
                    .unwrap_or(&self.config.default_redirect)
                    .to_string();
                info!(user = %session.user.id, target = %target, "already signed in, redirecting");
                self.collaborators.navigator.redirect(&target);
                Some(target)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session lookup failed");
                None
            }
        }
    }
}
