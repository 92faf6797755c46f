//! Field validation for Armature forms
//!
//! Validators check one submitted value at a time and report a
//! [`ValidationError`] attached to the field name. Chains of validators are
//! held in [`ValidationRules`].
//!
//! # Examples
//!
//! ```
//! use armature_validation::{Length, Required, ValidationContext, ValidationRules};
//!
//! let rules = ValidationRules::new()
//!     .add(Required::new())
//!     .add(Length::between(3, 20));
//!
//! let ctx = ValidationContext::new();
//! assert!(rules.validate(Some("danny"), "name", &ctx).is_ok());
//!
//! let errors = rules.validate(None, "name", &ctx).unwrap_err();
//! assert_eq!(errors[0].message, "This field is required.");
//! ```

mod errors;
mod rules;
mod traits;
mod validators;

pub use errors::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
