//! # Armature Forms
//!
//! HTML forms with session-bound CSRF protection.
//!
//! A [`Form`] is a list of declared [`Field`]s plus a
//! [`CsrfGuard`](armature_csrf::CsrfGuard). Request, session and app settings
//! are passed in explicitly through a [`FormContext`].
//!
//! ## Features
//!
//! - ✅ **CSRF Tokens** - Issued on construction, checked and rotated on validation
//! - ✅ **Fields** - Text, password, hidden, textarea and submit controls
//! - ✅ **Validation** - Per-field validator chains from `armature-validation`
//! - ✅ **Errors** - Serializable per-field error map for JSON responses
//!
//! ## Quick Start
//!
//! ```rust
//! use armature_config::AppConfig;
//! use armature_csrf::FormRequest;
//! use armature_forms::{Field, Form, FormContext};
//! use armature_session::Session;
//! use armature_validation::Required;
//! use std::time::Duration;
//!
//! let app = AppConfig::new();
//! let mut session = Session::new("sid", Duration::from_secs(3600));
//!
//! // Render on GET
//! let request = FormRequest::get("/");
//! let mut ctx = FormContext::new(&request, &mut session, &app);
//! let mut form = Form::builder()
//!     .field(Field::text("name").validator(Required::new()))
//!     .field(Field::submit("submit"))
//!     .build(&mut ctx)
//!     .unwrap();
//!
//! assert!(!form.validate_on_submit(&mut ctx).unwrap());
//! assert!(form.csrf_token().as_str().starts_with(r#"<div style="display:none;">"#));
//! ```

pub mod error;
pub mod field;
pub mod form;
pub mod widgets;

pub use error::{FormError, Result};
pub use field::{Field, FieldKind};
pub use form::{Form, FormBuilder, FormContext};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{FormError, Result};
    pub use crate::field::{Field, FieldKind};
    pub use crate::form::{Form, FormBuilder, FormContext};
    pub use armature_csrf::{FormData, FormRequest, Markup};
    pub use armature_validation::{FieldValidator, Length, Required, ValidationErrors};
}
