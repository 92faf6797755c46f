//! HTML for individual form controls.
//!
//! Attributes are written in a fixed order (`id`, `name`, `type`, `value`)
//! and every attribute value and text body is escaped.

use armature_csrf::{Markup, escape};

/// `<input>` element
pub fn input(input_type: &str, id: &str, name: &str, value: &str) -> Markup {
    Markup::raw(format!(
        r#"<input id="{}" name="{}" type="{}" value="{}">"#,
        escape(id),
        escape(name),
        input_type,
        escape(value)
    ))
}

/// `<textarea>` element with escaped content
pub fn textarea(id: &str, name: &str, content: &str) -> Markup {
    Markup::raw(format!(
        r#"<textarea id="{}" name="{}">{}</textarea>"#,
        escape(id),
        escape(name),
        escape(content)
    ))
}

pub fn label(for_id: &str, text: &str) -> Markup {
    Markup::raw(format!(
        r#"<label for="{}">{}</label>"#,
        escape(for_id),
        escape(text)
    ))
}
