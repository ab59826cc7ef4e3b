//! The notification collaborator.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info};

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Positive feedback.
    Success(String),
    /// A failure the user should know about.
    Error(String),
}

/// Delivers toast notifications.
pub trait Notifier: Send + Sync {
    /// Shows a success message.
    fn success(&self, message: &str);

    /// Shows an error message.
    fn error(&self, message: &str);
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(message, "notification");
    }

    fn error(&self, message: &str) {
        error!(message, "notification");
    }
}

/// Keeps every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    log: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications shown so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the error messages shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message),
                Notification::Success(_) => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
