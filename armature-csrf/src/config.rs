use crate::error::{CsrfError, Result};
use armature_config::AppConfig;
use http::Method;

/// App setting that turns CSRF protection on or off.
pub const CSRF_ENABLED: &str = "CSRF_ENABLED";

/// App setting naming the session key that holds the token.
pub const CSRF_SESSION_KEY: &str = "CSRF_SESSION_KEY";

/// Session key used when neither the form nor the app names one.
pub const DEFAULT_SESSION_KEY: &str = "_csrf_token";

/// Name of the hidden input carrying the token.
pub const DEFAULT_FIELD_NAME: &str = "csrf";

/// Per-form CSRF arguments.
///
/// `None` means "not given here", which defers to the app setting and then to
/// the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfOptions {
    pub enabled: Option<bool>,
    pub session_key: Option<String>,
    pub field_name: Option<String>,
}

impl CsrfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }
}

/// Resolved CSRF configuration for one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfConfig {
    /// Whether tokens are issued and checked at all
    pub enabled: bool,

    /// Session key under which the token is stored
    pub session_key: String,

    /// Form field name for the token
    pub field_name: String,

    /// Methods that count as a form submission
    pub submit_methods: Vec<Method>,
}

impl CsrfConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            enabled: true,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            submit_methods: vec![Method::POST, Method::PUT],
        }
    }

    /// Resolve explicit options against app settings.
    ///
    /// Each value comes from the first source that has it: `options`, then
    /// `app` (`CSRF_ENABLED`, `CSRF_SESSION_KEY`), then the default.
    pub fn resolve(options: &CsrfOptions, app: &AppConfig) -> Result<Self> {
        let mut config = Self::new();

        config.enabled = match options.enabled {
            Some(enabled) => enabled,
            None => app.get_bool_opt(CSRF_ENABLED)?.unwrap_or(true),
        };

        config.session_key = match options.session_key {
            Some(ref key) => key.clone(),
            None => app
                .get_opt::<Option<String>>(CSRF_SESSION_KEY)?
                .flatten()
                .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string()),
        };

        if let Some(ref name) = options.field_name {
            config.field_name = name.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Set enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set session key
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Set field name
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Set submission methods
    pub fn with_submit_methods(mut self, methods: Vec<Method>) -> Self {
        self.submit_methods = methods;
        self
    }

    /// Reject empty names
    pub fn validate(&self) -> Result<()> {
        if self.session_key.trim().is_empty() {
            return Err(CsrfError::InvalidConfig(
                "session key must not be empty".to_string(),
            ));
        }
        if self.field_name.trim().is_empty() {
            return Err(CsrfError::InvalidConfig(
                "field name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `method` counts as a form submission
    pub fn is_submit_method(&self, method: &Method) -> bool {
        self.submit_methods.contains(method)
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self::new()
    }
}
