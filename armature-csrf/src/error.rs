use armature_config::ConfigError;
use armature_session::SessionError;
use thiserror::Error;

/// Message reported on the token field when validation fails.
pub const INVALID_TOKEN_MESSAGE: &str = "Missing or invalid CSRF token.";

#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("Missing or invalid CSRF token.")]
    InvalidToken,

    #[error("Invalid CSRF configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Invalid form data: {0}")]
    InvalidFormData(String),
}

impl CsrfError {
    /// True for a failed token comparison, as opposed to an infrastructure error.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, CsrfError::InvalidToken)
    }
}

pub type Result<T> = std::result::Result<T, CsrfError>;
