//! Session configuration.

use crate::error::{SessionError, SessionResult};
use std::time::Duration;

/// Upper bound accepted for [`SessionConfig::max_ttl`] (ten years).
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(86400 * 3650);

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Session namespace/prefix
    pub namespace: String,
    /// Default session TTL
    pub default_ttl: Duration,
    /// Maximum session TTL
    pub max_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: "session".to_string(),
            default_ttl: Duration::from_secs(3600),  // 1 hour
            max_ttl: Duration::from_secs(86400 * 7), // 7 days
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default TTLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session namespace/prefix.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Set the default session TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the maximum session TTL.
    pub fn with_max_ttl(mut self, ttl: Duration) -> Self {
        self.max_ttl = ttl;
        self
    }

    /// Check the configuration for contradictions.
    pub fn validate(&self) -> SessionResult<()> {
        if self.namespace.is_empty() {
            return Err(SessionError::Config(
                "Session namespace must not be empty".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(SessionError::Config(
                "Default session TTL must be greater than zero".to_string(),
            ));
        }
        if self.max_ttl > MAX_SESSION_TTL {
            return Err(SessionError::Config(format!(
                "Maximum TTL {:?} exceeds the limit of {:?}",
                self.max_ttl, MAX_SESSION_TTL
            )));
        }
        if self.default_ttl > self.max_ttl {
            return Err(SessionError::Config(format!(
                "Default TTL {:?} exceeds maximum TTL {:?}",
                self.default_ttl, self.max_ttl
            )));
        }
        Ok(())
    }

    /// Resolve a requested TTL against the default and the maximum.
    pub fn effective_ttl(&self, ttl: Option<Duration>) -> Duration {
        ttl.unwrap_or(self.default_ttl).min(self.max_ttl)
    }

    /// Build the session key with namespace.
    pub fn session_key(&self, session_id: &str) -> String {
        format!("{}:{}", self.namespace, session_id)
    }
}
