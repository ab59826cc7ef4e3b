//! # oxide-router
//!
//! Navigation helpers for page hosts.
//!
//! This crate provides:
//! - [`Request`] with decoded query parameters
//! - [`Response`] with redirect support
//! - The [`Navigator`] collaborator and a recording implementation
//! - URL component encoding with `encodeURIComponent` semantics
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_router::{Navigator, RecordingNavigator, Request};
//!
//! let req = Request::get("/sign-up?redirectURL=%2Fevents%2F42");
//! let target = req.get_query("redirectURL");
//! assert_eq!(target, Some("/events/42"));
//!
//! let nav = RecordingNavigator::new();
//! assert_eq!(
//!     nav.sign_in_href(target),
//!     "/sign-in?redirectURL=%2Fevents%2F42"
//! );
//!
//! nav.redirect(target.unwrap_or("/"));
//! assert_eq!(nav.last_location().as_deref(), Some("/events/42"));
//! ```

mod error;
mod navigation;
mod request;
mod response;
pub mod url;

pub use error::{Result, RouterError};
pub use navigation::{sign_in_href, Navigator, RecordingNavigator, REDIRECT_PARAM, SIGN_IN_PATH};
pub use request::Request;
pub use response::Response;
