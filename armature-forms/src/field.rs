use crate::widgets;
use armature_csrf::{FormData, Markup};
use armature_validation::{FieldValidator, ValidationContext, ValidationError, ValidationRules};
use serde::Serialize;

/// Kind of control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Password,
    Hidden,
    TextArea,
    Submit,
}

impl FieldKind {
    /// Value of the `type` attribute; `None` for non-`<input>` controls
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Password => Some("password"),
            FieldKind::Hidden => Some("hidden"),
            FieldKind::Submit => Some("submit"),
            FieldKind::TextArea => None,
        }
    }
}

/// A declared form field.
///
/// `name` is the key read from submitted data and written into the `name`
/// attribute. It can be changed after declaration (e.g. to `_method`);
/// `id` keeps its original value.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    id: String,
    label: String,
    kind: FieldKind,
    rules: ValidationRules,
    default: Option<String>,
    data: Option<String>,
    errors: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            label: default_label(&name),
            name,
            kind,
            rules: ValidationRules::new(),
            default: None,
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Hidden)
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    pub fn submit(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Submit)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Submit under a different name, keeping the id
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Value used when nothing is submitted
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Append a validator to the chain
    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: FieldValidator + 'static,
    {
        self.rules.push(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == FieldKind::Hidden
    }

    /// Bound value: submitted data, else the default
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, value: Option<String>) {
        self.data = value;
    }

    /// Messages from the last validation
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Bind the first value submitted under this field's name
    pub fn process(&mut self, form: &FormData) {
        self.data = form
            .get(&self.name)
            .map(str::to_string)
            .or_else(|| self.default.clone());
    }

    /// Run the validator chain against the bound value.
    ///
    /// Previous errors are replaced.
    pub fn validate(&mut self, ctx: &ValidationContext) -> Vec<ValidationError> {
        self.errors.clear();

        match self.rules.validate(self.data.as_deref(), &self.name, ctx) {
            Ok(()) => Vec::new(),
            Err(errors) => {
                self.errors = errors.iter().map(|e| e.message.clone()).collect();
                errors
            }
        }
    }

    /// Render the control.
    ///
    /// Password fields never echo their value and submit buttons show their
    /// label.
    pub fn render(&self) -> Markup {
        let value = match self.kind {
            FieldKind::Password => "",
            FieldKind::Submit => self.label.as_str(),
            _ => self.data.as_deref().unwrap_or_default(),
        };

        match self.kind.input_type() {
            Some(input_type) => widgets::input(input_type, &self.id, &self.name, value),
            None => widgets::textarea(&self.id, &self.name, value),
        }
    }

    pub fn label_tag(&self) -> Markup {
        widgets::label(&self.id, &self.label)
    }
}

/// `first_name` becomes `First Name`
fn default_label(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use armature_validation::{Length, Required};

    #[test]
    fn test_default_label() {
        assert_eq!(Field::text("name").label(), "Name");
        assert_eq!(Field::text("first_name").label(), "First Name");
        assert_eq!(Field::text("x").with_label("Custom").label(), "Custom");
    }

    #[test]
    fn test_process_prefers_submitted_data() {
        let form: FormData = [("name", "danny")].into_iter().collect();

        let mut field = Field::text("name").with_default("anon");
        field.process(&form);
        assert_eq!(field.data(), Some("danny"));

        field.process(&FormData::new());
        assert_eq!(field.data(), Some("anon"));
    }

    #[test]
    fn test_rename_keeps_id() {
        let form: FormData = [("_method", "PUT")].into_iter().collect();
        let mut field = Field::hidden("method").rename("_method");
        field.process(&form);

        assert_eq!(
            field.render().as_str(),
            r#"<input id="method" name="_method" type="hidden" value="PUT">"#
        );
    }

    #[test]
    fn test_password_never_echoes() {
        let form: FormData = [("secret", "hunter2")].into_iter().collect();
        let mut field = Field::password("secret");
        field.process(&form);

        assert_eq!(field.data(), Some("hunter2"));
        assert!(!field.render().as_str().contains("hunter2"));
    }

    #[test]
    fn test_submit_and_textarea_render() {
        assert_eq!(
            Field::submit("submit").with_label("Save").render().as_str(),
            r#"<input id="submit" name="submit" type="submit" value="Save">"#
        );

        let mut bio = Field::textarea("bio");
        bio.set_data(Some("<b>".to_string()));
        assert_eq!(
            bio.render().as_str(),
            r#"<textarea id="bio" name="bio">&lt;b&gt;</textarea>"#
        );
        assert_eq!(bio.label_tag().as_str(), r#"<label for="bio">Bio</label>"#);
    }

    #[test]
    fn test_validate_replaces_errors() {
        let mut field = Field::text("name")
            .validator(Required::new())
            .validator(Length::min(3));

        let errors = field.validate(&ValidationContext::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(field.errors(), ["This field is required."]);

        field.set_data(Some("danny".to_string()));
        assert!(field.validate(&ValidationContext::new()).is_empty());
        assert!(field.errors().is_empty());
    }
}
