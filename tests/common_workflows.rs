//! Integration tests for common form workflows.
//!
//! These tests drive the facade crate the way an application would: load
//! settings, load the session, build a form, validate, save the session.

use armature::prelude::*;
use regex::Regex;

fn signup_form(ctx: &mut FormContext<'_>) -> Result<Form, FormError> {
    Form::builder()
        .field(Field::text("email").validator(Required::new()).validator(Email::new()))
        .field(
            Field::password("password")
                .validator(Required::new())
                .validator(Length::min(8)),
        )
        .field(
            Field::password("confirm")
                .with_label("Repeat Password")
                .validator(EqualTo::new("password")),
        )
        .field(Field::hidden("next").with_default("/"))
        .field(Field::submit("submit").with_label("Sign up"))
        .csrf_session_key("_signup_csrf")
        .build(ctx)
}

fn token_in(html: &str) -> String {
    let re = Regex::new(r#"name="csrf" type="hidden" value="([^"]+)""#).unwrap();
    re.captures(html).unwrap()[1].to_string()
}

// =============================================================================
// Signup Workflow
// =============================================================================

#[test]
fn test_signup_round_trip() {
    tokio_test::block_on(async {
        let store = MemorySessionStore::default();
        let app = AppConfig::new();

        // GET: render the form
        let mut session = store.create(None).await.unwrap();
        let request = FormRequest::get("/signup");
        let html = {
            let mut ctx = FormContext::new(&request, &mut session, &app);
            let form = signup_form(&mut ctx).unwrap();
            form.hidden_tag().into_string()
        };
        store.save(&session).await.unwrap();

        assert!(html.contains(r#"<input id="next" name="next" type="hidden" value="/">"#));
        let token = token_in(&html);

        // POST: submit with the scraped token
        let mut session = store.get(&session.id).await.unwrap().unwrap();
        let request = FormRequest::post(
            "/signup",
            [
                ("email", "danny@example.com"),
                ("password", "correct horse"),
                ("confirm", "correct horse"),
                ("csrf", token.as_str()),
            ]
            .into_iter()
            .collect(),
        );
        let mut ctx = FormContext::new(&request, &mut session, &app);
        let mut form = signup_form(&mut ctx).unwrap();

        assert!(form.validate_on_submit(&mut ctx).unwrap());
        assert_eq!(form.data("email"), Some("danny@example.com"));
        assert_eq!(form.data("next"), Some("/"));
        assert!(!form.field("password").unwrap().render().as_str().contains("correct horse"));
        drop(ctx);

        let stored: String = session.get("_signup_csrf").unwrap();
        assert_ne!(stored, token);
        store.save(&session).await.unwrap();
    });
}

#[test]
fn test_signup_field_errors() {
    let app = AppConfig::new();
    let mut session = Session::new("sid", std::time::Duration::from_secs(600));
    let request = FormRequest::post(
        "/signup",
        [("email", "not-an-email"), ("password", "short"), ("confirm", "other")]
            .into_iter()
            .collect(),
    )
    .xhr();

    let mut ctx = FormContext::new(&request, &mut session, &app);
    let mut form = signup_form(&mut ctx).unwrap();
    assert!(!form.validate_on_submit(&mut ctx).unwrap());

    let errors = serde_json::to_value(form.errors()).unwrap();
    assert_eq!(
        errors,
        serde_json::json!({
            "confirm": ["Field must be equal to password."],
            "email": ["Invalid email address."],
            "password": ["Field must be at least 8 characters long."],
        })
    );
    assert_eq!(
        form.field("password").unwrap().errors(),
        ["Field must be at least 8 characters long."]
    );
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_settings_from_env_style_values() {
    let app = AppConfig::new();
    app.load_str(
        r#"{"CSRF_ENABLED": "off", "CSRF_SESSION_KEY": "_ignored"}"#,
        FileFormat::Json,
    )
    .unwrap();

    let mut session = Session::new("sid", std::time::Duration::from_secs(600));
    let request = FormRequest::post("/", FormData::new());
    let mut ctx = FormContext::new(&request, &mut session, &app);

    let mut form = Form::builder().build(&mut ctx).unwrap();
    assert!(!form.csrf_enabled());
    assert!(form.validate_on_submit(&mut ctx).unwrap());
    assert!(session.data.is_empty());
}

#[test]
fn test_put_counts_as_submission() {
    let app = AppConfig::new();
    let mut session = Session::new("sid", std::time::Duration::from_secs(600));
    let request = FormRequest::new(http::Method::PUT, "/");

    let mut ctx = FormContext::new(&request, &mut session, &app);
    let mut form = Form::builder().build(&mut ctx).unwrap();

    assert!(form.is_submitted(&request));
    assert!(!form.validate_on_submit(&mut ctx).unwrap());
    assert_eq!(
        form.errors()["csrf"],
        vec![armature::armature_csrf::INVALID_TOKEN_MESSAGE.to_string()]
    );
}
