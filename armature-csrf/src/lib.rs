//! # Armature CSRF Protection
//!
//! Session-bound Cross-Site Request Forgery protection for Armature forms.
//!
//! ## Features
//!
//! - ✅ **Synchronizer Tokens** - One random token per session key
//! - ✅ **Single Use** - Every checked submission rotates the token
//! - ✅ **Configurable** - Per-form options over app settings over defaults
//! - ✅ **Script Requests** - `X-Requested-With: XMLHttpRequest` skips the check
//! - ✅ **Rendering** - Hidden input markup for templates
//!
//! ## Quick Start
//!
//! ```rust
//! use armature_csrf::{CsrfConfig, CsrfGuard, FormData, FormRequest};
//! use armature_session::Session;
//! use std::time::Duration;
//!
//! let mut session = Session::new("sid", Duration::from_secs(3600));
//!
//! // GET: issue a token and render it
//! let guard = CsrfGuard::new(CsrfConfig::default(), &mut session).unwrap();
//! let token = guard.token().unwrap().to_string();
//! assert!(guard.render().as_str().contains(&token));
//!
//! // POST: the submitted token is checked and rotated
//! let form: FormData = [("csrf", token.as_str())].into_iter().collect();
//! let request = FormRequest::post("/", form);
//!
//! let mut guard = CsrfGuard::new(CsrfConfig::default(), &mut session).unwrap();
//! assert!(guard.validate(request.form().get("csrf"), &request, &mut session).is_ok());
//!
//! // The same token does not work twice
//! assert!(guard.validate(Some(&token), &request, &mut session).is_err());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use armature_config::AppConfig;
//! use armature_csrf::{CSRF_SESSION_KEY, CsrfConfig, CsrfOptions};
//!
//! let app = AppConfig::from_pairs([(CSRF_SESSION_KEY, "_app_token")]).unwrap();
//!
//! let config = CsrfConfig::resolve(&CsrfOptions::new(), &app).unwrap();
//! assert_eq!(config.session_key, "_app_token");
//!
//! let config = CsrfConfig::resolve(&CsrfOptions::new().session_key("_login"), &app).unwrap();
//! assert_eq!(config.session_key, "_login");
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod markup;
pub mod request;
pub mod token;

pub use config::{
    CSRF_ENABLED, CSRF_SESSION_KEY, CsrfConfig, CsrfOptions, DEFAULT_FIELD_NAME,
    DEFAULT_SESSION_KEY,
};
pub use error::{CsrfError, INVALID_TOKEN_MESSAGE, Result};
pub use guard::CsrfGuard;
pub use markup::{Markup, escape};
pub use request::{FormData, FormRequest, X_REQUESTED_WITH};
pub use token::CsrfToken;
