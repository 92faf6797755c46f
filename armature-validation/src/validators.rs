// Built-in field validators

use crate::{FieldValidator, ValidationContext, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

/// Fails when the field is missing or only whitespace.
///
/// A failure stops the rest of the chain, so a blank field reports a single
/// "required" error instead of one per validator.
#[derive(Debug, Clone, Default)]
pub struct Required {
    message: Option<String>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for Required {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::new(
                field,
                self.message
                    .clone()
                    .unwrap_or_else(|| "This field is required.".to_string()),
            )
            .with_constraint("required")),
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }

    fn stops_chain(&self) -> bool {
        true
    }
}

/// Character count bounds. A missing value counts as empty.
#[derive(Debug, Clone, Default)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
    message: Option<String>,
}

impl Length {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    pub fn min(min: usize) -> Self {
        Self::new(Some(min), None)
    }

    pub fn max(max: usize) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn default_message(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                format!("Field must be between {} and {} characters long.", min, max)
            }
            (Some(min), None) => format!("Field must be at least {} characters long.", min),
            (None, Some(max)) => format!("Field cannot be longer than {} characters.", max),
            (None, None) => "Invalid field length.".to_string(),
        }
    }
}

impl FieldValidator for Length {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        let text = value.unwrap_or("");
        let len = text.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);

        if too_short || too_long {
            Err(ValidationError::new(
                field,
                self.message.clone().unwrap_or_else(|| self.default_message()),
            )
            .with_constraint("length")
            .with_value(text))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

/// Email address format.
#[derive(Debug, Clone, Default)]
pub struct Email {
    message: Option<String>,
}

impl Email {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for Email {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        let text = value.unwrap_or("").trim();
        if EMAIL_REGEX.is_match(text) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                self.message
                    .clone()
                    .unwrap_or_else(|| "Invalid email address.".to_string()),
            )
            .with_constraint("email")
            .with_value(text))
        }
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

/// The value must equal the value submitted for another field.
#[derive(Debug, Clone)]
pub struct EqualTo {
    pub other: String,
    message: Option<String>,
}

impl EqualTo {
    pub fn new(other: impl Into<String>) -> Self {
        Self {
            other: other.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for EqualTo {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        if ctx.get(&self.other).map(String::as_str) == value {
            return Ok(());
        }

        Err(ValidationError::new(
            field,
            self.message
                .clone()
                .unwrap_or_else(|| format!("Field must be equal to {}.", self.other)),
        )
        .with_constraint("equalTo"))
    }

    fn name(&self) -> &'static str {
        "equalTo"
    }
}

/// The value must match a regular expression.
#[derive(Debug, Clone)]
pub struct Regexp {
    pub regex: Regex,
    message: Option<String>,
}

impl Regexp {
    pub fn new(regex: Regex) -> Self {
        Self {
            regex,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for Regexp {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        let text = value.unwrap_or("");
        if self.regex.is_match(text) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                self.message
                    .clone()
                    .unwrap_or_else(|| "Invalid input.".to_string()),
            )
            .with_constraint("regexp")
            .with_value(text))
        }
    }

    fn name(&self) -> &'static str {
        "regexp"
    }
}

/// The value must be one of a fixed set.
#[derive(Debug, Clone)]
pub struct AnyOf {
    pub values: Vec<String>,
    message: Option<String>,
}

impl AnyOf {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for AnyOf {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        match value {
            Some(v) if self.values.iter().any(|allowed| allowed == v) => Ok(()),
            _ => Err(ValidationError::new(
                field,
                self.message.clone().unwrap_or_else(|| {
                    format!("Invalid value, must be one of: {}.", self.values.join(", "))
                }),
            )
            .with_constraint("anyOf")),
        }
    }

    fn name(&self) -> &'static str {
        "anyOf"
    }
}

/// The value must not be any of a fixed set.
#[derive(Debug, Clone)]
pub struct NoneOf {
    pub values: Vec<String>,
    message: Option<String>,
}

impl NoneOf {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for NoneOf {
    fn validate(
        &self,
        value: Option<&str>,
        field: &str,
        _ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        match value {
            Some(v) if self.values.iter().any(|denied| denied == v) => {
                Err(ValidationError::new(
                    field,
                    self.message.clone().unwrap_or_else(|| {
                        format!("Invalid value, can't be any of: {}.", self.values.join(", "))
                    }),
                )
                .with_constraint("noneOf")
                .with_value(v))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "noneOf"
    }
}
