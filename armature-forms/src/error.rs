use armature_csrf::CsrfError;
use armature_session::SessionError;
use thiserror::Error;

/// Errors from building or validating a form.
///
/// A bad CSRF token is not one of these; it is reported as a field error.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("CSRF error: {0}")]
    Csrf(#[from] CsrfError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Duplicate field name: {0}")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
