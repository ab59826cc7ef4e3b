//! Error types for the sign-up page.

use thiserror::Error;

/// Sign-up specific errors.
#[derive(Debug, Error)]
pub enum SignupError {
    /// Form controller error.
    #[error("form error: {0}")]
    Form(#[from] oxide_forms::FormError),

    /// Authentication collaborator error.
    #[error("authentication error: {0}")]
    Auth(#[from] oxide_auth::AuthError),

    /// Redirect target could not be decoded.
    #[error("redirect error: {0}")]
    Router(#[from] oxide_router::RouterError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for sign-up operations.
pub type Result<T> = std::result::Result<T, SignupError>;
