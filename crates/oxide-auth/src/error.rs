//! Error types for authentication.

use thiserror::Error;

/// Authentication-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend rejected the request with a user-facing message.
    #[error("{message}")]
    Api {
        /// HTTP-like status code.
        status: u16,
        /// Machine-readable error code.
        code: String,
        /// Message intended for the user.
        message: String,
    },

    /// The request never produced a backend answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// Invalid credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session not found or expired.
    #[error("session not found or expired")]
    SessionNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHashError,

    /// Password shorter than the backend accepts.
    #[error("password too short")]
    PasswordTooShort,

    /// Password longer than the backend accepts.
    #[error("password too long")]
    PasswordTooLong,
}

impl AuthError {
    /// Creates a backend-reported error.
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns the message the backend meant for the user, if any.
    ///
    /// Only [`AuthError::Api`] carries one; every other variant is an
    /// unexpected failure of the call itself.
    pub fn reported_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
