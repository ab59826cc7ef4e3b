//! The authentication collaborator used by sign-up forms.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::error::Result;
use crate::session::Session;
use crate::user::User;

/// A boxed future for async collaborator operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Payload of an email sign-up.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Where the backend should send the user after verification.
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Successful sign-up answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResponse {
    /// The created account.
    pub user: User,
    /// Session created by auto sign-in, if the backend does that.
    pub session: Option<Session>,
}

/// Creates accounts.
///
/// Backend refusals come back as [`crate::AuthError::Api`]; any other error
/// means the call itself failed.
pub trait AuthClient: Send + Sync {
    /// Signs up with email and password.
    fn sign_up_email<'a>(&'a self, request: &'a SignUpRequest)
        -> BoxFuture<'a, Result<SignUpResponse>>;
}
