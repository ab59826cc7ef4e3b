//! # oxide-signup
//!
//! A sign-up page built on [`oxide_forms`]: first name, last name, email and
//! password with sync rules, debounced async checks, guarded submission to an
//! [`oxide_auth::AuthClient`], and a redirect for visitors who are already
//! signed in.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_auth::{MemoryBackend, StaticSession};
//! use oxide_router::RecordingNavigator;
//! use oxide_signup::{
//!     fields, Collaborators, MountOutcome, RecordingNotifier, SignupConfig, SignupOutcome,
//!     SignupPage,
//! };
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> oxide_signup::Result<()> {
//! let page = SignupPage::new(
//!     SignupConfig::default(),
//!     Collaborators {
//!         auth: Arc::new(MemoryBackend::new()),
//!         sessions: Arc::new(StaticSession::anonymous()),
//!         navigator: Arc::new(RecordingNavigator::new()),
//!         notifier: Arc::new(RecordingNotifier::new()),
//!     },
//! );
//!
//! let MountOutcome::Render(form) = page.mount(None).await? else {
//!     unreachable!("anonymous visitors get the form");
//! };
//! form.handle_change(fields::FIRST_NAME, "Alice")?;
//! form.handle_change(fields::LAST_NAME, "Lee")?;
//! form.handle_change(fields::EMAIL, "alice@example.com")?;
//! form.handle_change(fields::PASSWORD, "secret123")?;
//! form.settled().await;
//!
//! assert!(matches!(page.submit(&form).await, SignupOutcome::SignedUp(_)));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod fields;
mod form;
mod notify;
mod page;

pub use config::SignupConfig;
pub use error::{Result, SignupError};
pub use form::{SignupForm, SignupOutcome, SUBMIT_LABELS};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use page::{Collaborators, MountOutcome, SignupPage};
