use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An issued CSRF token.
///
/// The value is a random (v4) UUID in its hyphenated form, 122 bits of which
/// come from the OS random source.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Generate a new CSRF token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing value, e.g. one read back from the session
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Exact comparison with a submitted value. Empty or missing never matches.
    pub fn matches(&self, submitted: Option<&str>) -> bool {
        match submitted {
            Some(value) => !value.is_empty() && !self.0.is_empty() && value == self.0,
            None => false,
        }
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"***").finish()
    }
}

impl fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CsrfToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let token = CsrfToken::generate();
        assert_eq!(token.as_str().len(), 36);
        assert!(Uuid::parse_str(token.as_str()).is_ok());
        assert_ne!(token, CsrfToken::generate());
    }

    #[test]
    fn test_matches() {
        let token = CsrfToken::new("abc");
        assert!(token.matches(Some("abc")));
        assert!(!token.matches(Some("abd")));
        assert!(!token.matches(Some("")));
        assert!(!token.matches(None));
        assert!(!CsrfToken::new("").matches(Some("")));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = CsrfToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret-value"));
        assert_eq!(token.to_string(), "secret-value");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let token = CsrfToken::new("abc");
        assert_eq!(serde_json::to_value(&token).unwrap(), "abc");
    }
}
