//! HTML fragments that are already safe to embed.

use serde::Serialize;
use std::fmt;

/// A rendered HTML fragment.
///
/// Template code should insert a `Markup` verbatim; escaping it again would
/// break the tags. Build one with [`Markup::raw`] only from trusted text and
/// run user data through [`escape`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap trusted HTML
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape untrusted text into a fragment
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Append another fragment
    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    /// Wrap the fragment in a `<div>` that is never displayed.
    pub fn hidden_div(self) -> Self {
        Self(format!(r#"<div style="display:none;">{}</div>"#, self.0))
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::empty();
        for part in iter {
            out.push(&part);
        }
        out
    }
}

/// Escape text for element content and double-quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
