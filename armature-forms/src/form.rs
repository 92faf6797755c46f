use crate::error::{FormError, Result};
use crate::field::Field;
use armature_config::AppConfig;
use armature_csrf::{
    CsrfConfig, CsrfError, CsrfGuard, CsrfOptions, FormRequest, INVALID_TOKEN_MESSAGE, Markup,
};
use armature_session::Session;
use armature_validation::{ValidationContext, ValidationError, ValidationErrors};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Request-scoped inputs a form reads from.
pub struct FormContext<'a> {
    pub request: &'a FormRequest,
    pub session: &'a mut Session,
    pub config: &'a AppConfig,
}

impl<'a> FormContext<'a> {
    pub fn new(request: &'a FormRequest, session: &'a mut Session, config: &'a AppConfig) -> Self {
        Self {
            request,
            session,
            config,
        }
    }
}

/// Builder for [`Form`]
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<Field>,
    csrf: CsrfOptions,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Fields render and validate in declaration order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Turn CSRF protection on or off for this form, overriding `CSRF_ENABLED`
    pub fn csrf_enabled(mut self, enabled: bool) -> Self {
        self.csrf = self.csrf.enabled(enabled);
        self
    }

    /// Session key for this form's token, overriding `CSRF_SESSION_KEY`
    pub fn csrf_session_key(mut self, key: impl Into<String>) -> Self {
        self.csrf = self.csrf.session_key(key);
        self
    }

    /// Name of the hidden token input
    pub fn csrf_field_name(mut self, name: impl Into<String>) -> Self {
        self.csrf = self.csrf.field_name(name);
        self
    }

    /// Resolve CSRF settings, issue the token and bind submitted data.
    ///
    /// Fails if two fields (or a field and the token input) share a name.
    pub fn build(self, ctx: &mut FormContext<'_>) -> Result<Form> {
        let config = CsrfConfig::resolve(&self.csrf, ctx.config)?;

        let mut seen = HashSet::new();
        if config.enabled {
            seen.insert(config.field_name.clone());
        }
        for field in &self.fields {
            if !seen.insert(field.name().to_string()) {
                return Err(FormError::DuplicateField(field.name().to_string()));
            }
        }

        let csrf = CsrfGuard::new(config, ctx.session)?;

        let mut fields = self.fields;
        for field in &mut fields {
            field.process(ctx.request.form());
        }

        debug!(
            path = %ctx.request.path(),
            fields = fields.len(),
            csrf_enabled = csrf.is_enabled(),
            "Form bound"
        );

        Ok(Form {
            fields,
            csrf,
            errors: ValidationErrors::default(),
        })
    }
}

/// An HTML form with CSRF protection.
///
/// Holds the declared fields and a [`CsrfGuard`]. The token is not an
/// ordinary field: its rendered value always comes from the session, never
/// from submitted data.
#[derive(Debug)]
pub struct Form {
    fields: Vec<Field>,
    csrf: CsrfGuard,
    errors: ValidationErrors,
}

impl Form {
    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Bound value of a field
    pub fn data(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Field::data)
    }

    pub fn csrf(&self) -> &CsrfGuard {
        &self.csrf
    }

    pub fn csrf_enabled(&self) -> bool {
        self.csrf.is_enabled()
    }

    /// Hidden token input inside a non-displayed `<div>`
    pub fn csrf_token(&self) -> Markup {
        self.csrf.render()
    }

    /// Token input plus every hidden field, inside one non-displayed `<div>`.
    pub fn hidden_tag(&self) -> Markup {
        let mut inner = self.csrf.hidden_input();
        for field in self.fields.iter().filter(|f| f.is_hidden()) {
            inner.push(&field.render());
        }

        if inner.is_empty() {
            inner
        } else {
            inner.hidden_div()
        }
    }

    /// Issue a fresh token for a form re-rendered without a redirect
    pub fn reset_csrf(&mut self, session: &mut Session) -> Result<()> {
        self.csrf.reset_token(session)?;
        Ok(())
    }

    /// Validate every field and the CSRF token.
    ///
    /// Returns `Ok(false)` when any field, the token included, has errors.
    /// `Err` is reserved for session and configuration failures.
    pub fn validate(&mut self, ctx: &mut FormContext<'_>) -> Result<bool> {
        let request = ctx.request;
        let mut errors = ValidationErrors::default();

        let submitted = request.form().get(self.csrf.field_name());
        match self.csrf.validate(submitted, request, ctx.session) {
            Ok(()) => {}
            Err(CsrfError::InvalidToken) => errors.add(
                ValidationError::new(self.csrf.field_name(), INVALID_TOKEN_MESSAGE)
                    .with_constraint("csrf"),
            ),
            Err(e) => return Err(e.into()),
        }

        let vctx = self.field_context();
        for field in &mut self.fields {
            for error in field.validate(&vctx) {
                errors.add(error);
            }
        }

        debug!(
            path = %request.path(),
            method = %request.method(),
            errors = errors.len(),
            "Form validated"
        );

        self.errors = errors;
        Ok(self.errors.is_empty())
    }

    /// Bound field values for cross-field validators such as `EqualTo`.
    ///
    /// Keyed by submitted name and by id, so a renamed field can still be
    /// referenced by the name it was declared with.
    fn field_context(&self) -> ValidationContext {
        let bound = self
            .fields
            .iter()
            .filter_map(|f| f.data().map(|data| (f, data)));

        let by_name = bound.clone().map(|(f, data)| (f.name(), data));
        let by_id = bound.map(|(f, data)| (f.id(), data));
        ValidationContext::from_pairs(by_name.chain(by_id))
    }

    /// Whether the request method counts as a submission
    pub fn is_submitted(&self, request: &FormRequest) -> bool {
        self.csrf.config().is_submit_method(request.method())
    }

    /// Validate only when the request is a submission.
    ///
    /// A GET returns `Ok(false)` without running validators or rotating the
    /// token.
    pub fn validate_on_submit(&mut self, ctx: &mut FormContext<'_>) -> Result<bool> {
        if !self.is_submitted(ctx.request) {
            return Ok(false);
        }
        self.validate(ctx)
    }

    /// Error messages from the last validation, keyed by field name
    pub fn errors(&self) -> BTreeMap<String, Vec<String>> {
        self.errors.by_field()
    }

    /// Errors from the last validation in reporting order
    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }
}
