use crate::{
    config::CsrfConfig,
    error::{CsrfError, Result},
    markup::{Markup, escape},
    request::FormRequest,
    token::CsrfToken,
};
use armature_session::Session;
use tracing::{debug, trace, warn};

/// Session-bound CSRF protection for one form.
///
/// The guard keeps the token it last saw or issued, so a form re-rendered
/// after validation embeds the rotated token rather than the spent one.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    config: CsrfConfig,
    token: Option<CsrfToken>,
}

impl CsrfGuard {
    /// Create a guard, issuing a token into `session` if none is stored yet.
    ///
    /// A disabled guard never touches the session.
    pub fn new(config: CsrfConfig, session: &mut Session) -> Result<Self> {
        config.validate()?;

        let mut guard = Self {
            config,
            token: None,
        };
        if guard.config.enabled {
            guard.issue_token(session)?;
        }
        Ok(guard)
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn field_name(&self) -> &str {
        &self.config.field_name
    }

    pub fn session_key(&self) -> &str {
        &self.config.session_key
    }

    /// Token the guard will render, if any
    pub fn token(&self) -> Option<&CsrfToken> {
        self.token.as_ref()
    }

    /// Return the stored token, generating and storing one if absent.
    pub fn issue_token(&mut self, session: &mut Session) -> Result<CsrfToken> {
        let token = match session.get::<String>(&self.config.session_key) {
            Some(value) if !value.is_empty() => {
                trace!(session_key = %self.config.session_key, "Reusing stored CSRF token");
                CsrfToken::new(value)
            }
            _ => return self.reset_token(session),
        };

        self.token = Some(token.clone());
        Ok(token)
    }

    /// Replace the stored token with a fresh one.
    ///
    /// Call this before re-rendering a form in the same response instead of
    /// redirecting; validation calls it on every attempt.
    pub fn reset_token(&mut self, session: &mut Session) -> Result<CsrfToken> {
        let token = CsrfToken::generate();
        session.set(&self.config.session_key, token.as_str())?;

        debug!(session_key = %self.config.session_key, "Issued new CSRF token");
        self.token = Some(token.clone());
        Ok(token)
    }

    /// `<input type="hidden">` carrying the current token.
    ///
    /// Empty when protection is disabled.
    pub fn hidden_input(&self) -> Markup {
        if !self.config.enabled {
            return Markup::empty();
        }

        let name = escape(&self.config.field_name);
        let value = self.token.as_ref().map(|t| escape(t.as_str())).unwrap_or_default();
        Markup::raw(format!(
            r#"<input id="{name}" name="{name}" type="hidden" value="{value}">"#
        ))
    }

    /// The hidden input inside a non-displayed `<div>`.
    pub fn render(&self) -> Markup {
        if !self.config.enabled {
            return Markup::empty();
        }
        self.hidden_input().hidden_div()
    }

    /// Check a submitted token against the one stored in the session.
    ///
    /// Disabled guards and script-initiated requests (`X-Requested-With:
    /// XMLHttpRequest`) pass without a check and without rotation. Otherwise
    /// the stored token is consumed and a fresh one issued whatever the
    /// outcome, so a token is good for one attempt only.
    ///
    /// A failed comparison is [`CsrfError::InvalidToken`]; session failures
    /// are reported as [`CsrfError::Session`].
    pub fn validate(
        &mut self,
        submitted: Option<&str>,
        request: &FormRequest,
        session: &mut Session,
    ) -> Result<()> {
        if !self.config.enabled {
            trace!("CSRF protection disabled, skipping token check");
            return Ok(());
        }

        if request.is_xhr() {
            debug!(path = %request.path(), "XHR request, skipping CSRF token check");
            return Ok(());
        }

        let stored = session.pop::<String>(&self.config.session_key);
        let is_valid = stored
            .map(CsrfToken::new)
            .is_some_and(|token| token.matches(submitted));

        self.reset_token(session)?;

        if is_valid {
            debug!(path = %request.path(), field = %self.config.field_name, "CSRF token accepted");
            Ok(())
        } else {
            warn!(
                path = %request.path(),
                method = %request.method(),
                field = %self.config.field_name,
                submitted = submitted.is_some_and(|s| !s.is_empty()),
                "Missing or invalid CSRF token"
            );
            Err(CsrfError::InvalidToken)
        }
    }
}
