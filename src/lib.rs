// Armature forms - CSRF-protected HTML forms for Rust
//
// Re-exports the form, CSRF, session, validation and configuration crates
// under one name.

// Re-export form handling
pub use armature_forms::*;

// Re-export member crates
pub use armature_config;
pub use armature_csrf;
pub use armature_session;
pub use armature_validation;

// Prelude for common imports
pub mod prelude {
    pub use armature_config::{AppConfig, FileFormat};
    pub use armature_csrf::{
        CsrfConfig, CsrfError, CsrfGuard, CsrfOptions, CsrfToken, FormData, FormRequest, Markup,
    };
    pub use armature_forms::{Field, FieldKind, Form, FormBuilder, FormContext, FormError};
    pub use armature_session::{MemorySessionStore, Session, SessionConfig, SessionStore};
    pub use armature_validation::{
        AnyOf, Email, EqualTo, FieldValidator, Length, NoneOf, Regexp, Required,
        ValidationContext, ValidationError, ValidationErrors,
    };
}
