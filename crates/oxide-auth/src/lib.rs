//! # oxide-auth
//!
//! Authentication collaborators for sign-up forms.
//!
//! This crate provides:
//! - The [`AuthClient`] trait for creating accounts by email and password
//! - [`Session`]s and the [`SessionProvider`] trait used by mount guards
//! - Password hashing with Argon2
//! - [`MemoryBackend`], an in-memory implementation of both collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_auth::{AuthClient, MemoryBackend, SessionProvider, SignUpRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> oxide_auth::Result<()> {
//! let backend = MemoryBackend::new();
//! let request = SignUpRequest {
//!     email: "alice@example.com".into(),
//!     password: "secret123".into(),
//!     name: "Alice Lee".into(),
//!     callback_url: "/".into(),
//! };
//!
//! let response = backend.sign_up_email(&request).await?;
//! assert_eq!(response.user.name, "Alice Lee");
//! assert!(backend.current_session().await?.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Refusals decided by the backend (duplicate email, short password) are
//! [`AuthError::Api`] and carry a message meant for the user. Any other
//! variant means the call itself failed.
//!
//! ## Password Hashing
//!
//! ```rust
//! use oxide_auth::{hash_password, verify_password};
//!
//! let hash = hash_password("secret123").expect("hashing works");
//! assert!(verify_password("secret123", &hash));
//! assert!(!verify_password("wrong", &hash));
//! ```

pub mod backends;
mod client;
mod error;
mod password;
mod session;
mod user;

pub use backends::{MemoryBackend, MemoryBackendConfig};
pub use client::{AuthClient, BoxFuture, SignUpRequest, SignUpResponse};
pub use error::{AuthError, Result};
pub use password::{
    hash_password, validate_password, verify_password, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use session::{Session, SessionProvider, StaticSession};
pub use user::User;
