//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A percent-encoded component could not be decoded.
    #[error("invalid URL encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
