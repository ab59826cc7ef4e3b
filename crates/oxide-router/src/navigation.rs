//! The navigation collaborator.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::response::Response;
use crate::url::encode_component;

/// Path of the sign-in page.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Query parameter carrying the page to return to after authentication.
pub const REDIRECT_PARAM: &str = "redirectURL";

/// Builds a link to `base` that carries the pending redirect target.
///
/// An absent or empty target yields the bare path.
pub fn sign_in_href(base: &str, redirect: Option<&str>) -> String {
    match redirect.filter(|r| !r.is_empty()) {
        Some(target) => format!("{base}?{REDIRECT_PARAM}={}", encode_component(target)),
        None => base.to_string(),
    }
}

/// Performs redirects for a page host.
pub trait Navigator: Send + Sync {
    /// Redirects to `path` immediately.
    fn redirect(&self, path: &str);

    /// Returns the sign-in link for a pending redirect target.
    fn sign_in_href(&self, redirect: Option<&str>) -> String {
        sign_in_href(SIGN_IN_PATH, redirect)
    }
}

/// A navigator that records redirects as `302` responses.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<Response>>,
}

impl RecordingNavigator {
    /// Creates an empty navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every redirect issued so far.
    pub fn redirects(&self) -> Vec<Response> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the target of the last redirect.
    pub fn last_location(&self) -> Option<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .and_then(|r| r.location().map(str::to_string))
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        debug!(path, "redirect");
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Response::redirect(path));
    }
}
