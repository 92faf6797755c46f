//! Session errors.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures reading, writing or persisting session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A value could not be encoded as JSON for storage
    #[error("Failed to store session value: {0}")]
    Serialization(String),

    /// A stored value does not decode into the requested type
    #[error("Session value {key:?} has an unexpected type: {reason}")]
    Deserialization { key: String, reason: String },

    /// Saving a session whose expiry has passed
    #[error("Session expired: {0}")]
    Expired(String),

    /// Store configuration is inconsistent
    #[error("Invalid session configuration: {0}")]
    Config(String),

    #[error("Invalid session ID: {0}")]
    InvalidSessionId(String),
}
