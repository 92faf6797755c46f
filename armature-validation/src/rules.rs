// Validator chains

use crate::{FieldValidator, ValidationContext, ValidationError};
use std::fmt;
use std::sync::Arc;

/// Ordered validators for one field.
///
/// Every validator runs and all failures are reported, except that a failing
/// validator whose [`FieldValidator::stops_chain`] is true ends the run.
#[derive(Clone, Default)]
pub struct ValidationRules {
    validators: Vec<Arc<dyn FieldValidator>>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator
    #[allow(clippy::should_implement_trait)]
    pub fn add<V>(mut self, validator: V) -> Self
    where
        V: FieldValidator + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append a validator in place
    pub fn push<V>(&mut self, validator: V)
    where
        V: FieldValidator + 'static,
    {
        self.validators.push(Arc::new(validator));
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the validators in order
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run the chain against a value
    pub fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        ctx: &ValidationContext,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for validator in &self.validators {
            if let Err(error) = validator.validate(value, field, ctx) {
                errors.push(error);
                if validator.stops_chain() {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
