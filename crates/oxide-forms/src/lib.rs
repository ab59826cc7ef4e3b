//! # oxide-forms
//!
//! Reactive form state with sync and debounced async validation, guarded
//! submission, and Bootstrap 5 rendering.
//!
//! This crate provides:
//! - Field definitions with synchronous and asynchronous validators
//! - A [`FormController`] holding values, per-field validation state and
//!   submission state
//! - One cancelable async check per field (last edit wins)
//! - Snapshot subscriptions for re-rendering
//! - Bootstrap 5 rendering of snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use oxide_forms::{FieldDef, FormBuilder, FormConfig, FormController, SubmitOutcome};
//! use oxide_forms::validation::{
//!     ForbiddenSubstringValidator, MinLengthValidator, RequiredValidator,
//! };
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> oxide_forms::Result<()> {
//! let fields = FormBuilder::new()
//!     .field(
//!         FieldDef::new("password", "Password")
//!             .validator(RequiredValidator::with_message("Password required"))
//!             .validator(MinLengthValidator::with_message(6, "Too short"))
//!             .async_validator(ForbiddenSubstringValidator::new("error", "Not allowed")),
//!     )
//!     .build();
//!
//! let form = FormController::new(fields, FormConfig::default())?;
//! form.set_value("password", "hunter22")?;
//! assert!(!form.can_submit()); // async check pending
//!
//! tokio::time::sleep(Duration::from_millis(500)).await;
//! assert!(form.can_submit());
//!
//! let outcome = form
//!     .submit(|values| async move { Ok::<_, String>(values["password"].len()) })
//!     .await;
//! assert_eq!(outcome, SubmitOutcome::Completed(8));
//! # Ok(())
//! # }
//! ```
//!
//! ## Subscriptions
//!
//! [`FormController::subscribe`] registers a callback that receives a
//! [`FormSnapshot`] after every change. Pass snapshots to
//! [`render::render_bootstrap_form`] to re-render.

mod config;
mod controller;
pub mod debounce;
mod error;
mod field;
pub mod render;
mod state;
pub mod validation;
pub mod widgets;

pub use config::{FormConfig, DEFAULT_DEBOUNCE_MS};
pub use controller::{FormController, SubmitOutcome, Subscription};
pub use error::{FormError, Result, ValidationErrors};
pub use field::{FieldDef, FormBuilder};
pub use state::{FieldMeta, FieldSnapshot, FormSnapshot};
