//! Integration tests for armature-validation

use armature_validation::*;

#[test]
fn test_signup_rules() {
    let ctx = ValidationContext::from_pairs([
        ("email", "user@example.com"),
        ("password", "hunter22"),
        ("confirm", "hunter2"),
    ]);

    let email = ValidationRules::new().add(Required::new()).add(Email::new());
    let confirm = ValidationRules::new()
        .add(Required::new())
        .add(EqualTo::new("password").with_message("Passwords must match."));

    assert!(email.validate(ctx.get("email").map(String::as_str), "email", &ctx).is_ok());

    let errors = confirm
        .validate(ctx.get("confirm").map(String::as_str), "confirm", &ctx)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "confirm");
    assert_eq!(errors[0].message, "Passwords must match.");
}

#[test]
fn test_errors_collection_groups_messages() {
    let ctx = ValidationContext::new();
    let mut all = ValidationErrors::default();

    let name = ValidationRules::new().add(Required::new());
    for error in name.validate(Some(""), "name", &ctx).unwrap_err() {
        all.add(error);
    }
    all.add(ValidationError::new("csrf", "Missing or invalid CSRF token."));

    let grouped = all.by_field();
    assert_eq!(grouped["name"], vec!["This field is required."]);
    assert_eq!(grouped["csrf"], vec!["Missing or invalid CSRF token."]);
    assert_eq!(all.to_string().lines().count(), 2);
}

#[test]
fn test_first_value_wins_in_context() {
    let ctx = ValidationContext::from_pairs([("tag", "a"), ("tag", "b")]);
    assert_eq!(ctx.get("tag").map(String::as_str), Some("a"));
}

#[test]
fn test_custom_message_on_required() {
    let rules = ValidationRules::new().add(Required::new().with_message("Name please."));
    let errors = rules
        .validate(None, "name", &ValidationContext::new())
        .unwrap_err();

    assert_eq!(errors[0].to_string(), "name: Name please.");
}
