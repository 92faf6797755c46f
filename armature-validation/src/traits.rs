// Validation traits

use crate::ValidationError;
use std::collections::HashMap;

/// A check applied to one submitted form value.
///
/// `value` is `None` when the field was not submitted at all. `ctx` carries
/// every submitted value so cross-field checks such as
/// [`EqualTo`](crate::EqualTo) can see the rest of the form.
pub trait FieldValidator: Send + Sync {
    /// Validate a value
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        ctx: &ValidationContext,
    ) -> Result<(), ValidationError>;

    /// Get validator name
    fn name(&self) -> &'static str;

    /// Whether a failure of this validator skips the rest of the chain.
    fn stops_chain(&self) -> bool {
        false
    }
}

impl<F> FieldValidator for F
where
    F: Fn(Option<&str>, &str, &ValidationContext) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        self(value, field, ctx)
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Validation context for additional data
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Submitted values keyed by field name
    pub data: HashMap<String, String>,
}

impl ValidationContext {
    /// Create a new validation context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from submitted name/value pairs.
    ///
    /// When a name repeats, the first value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = HashMap::new();
        for (key, value) in pairs {
            data.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { data }
    }

    /// Add context data
    pub fn with_data(mut self, key: String, value: String) -> Self {
        self.data.insert(key, value);
        self
    }

    /// Get context data
    pub fn get(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }
}
