//! The request view forms are validated against.

use crate::error::{CsrfError, Result};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Header set by script-initiated requests.
pub const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Submitted form fields in submission order.
///
/// Names may repeat; [`FormData::get`] returns the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &[u8]) -> Result<Self> {
        let entries = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map_err(|e| CsrfError::InvalidFormData(e.to_string()))?;
        Ok(Self { entries })
    }

    /// Parse a flat JSON object body.
    ///
    /// Strings are taken as-is, numbers and booleans are stringified, arrays
    /// become repeated names and `null` is skipped.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| CsrfError::InvalidFormData(e.to_string()))?;
        let serde_json::Value::Object(object) = value else {
            return Err(CsrfError::InvalidFormData(
                "expected a JSON object".to_string(),
            ));
        };

        let mut data = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_to_string(item) {
                            data.append(name.clone(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_to_string(other) {
                        data.append(name, text);
                    }
                }
            }
        }
        Ok(data)
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `name`
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Add a value, keeping earlier values for the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replace all values for `name` with one value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(key, _)| *key != name);
        self.entries.push((name, value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn scalar_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// An incoming request as seen by form handling
#[derive(Debug, Clone)]
pub struct FormRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    form: FormData,
}

impl FormRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            form: FormData::new(),
        }
    }

    /// A GET request with no form data
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request carrying `form`
    pub fn post(path: impl Into<String>, form: FormData) -> Self {
        Self::new(Method::POST, path).with_form(form)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Mark the request as script-initiated
    pub fn xhr(self) -> Self {
        self.with_header(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"))
    }

    pub fn with_form(mut self, form: FormData) -> Self {
        self.form = form;
        self
    }

    /// Parse the body according to the `Content-Type` header.
    ///
    /// JSON bodies are read as a flat object; anything else is treated as
    /// URL-encoded form data.
    pub fn with_body(mut self, body: &[u8]) -> Result<Self> {
        let is_json = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim_start().starts_with("application/json"));

        self.form = if is_json {
            FormData::from_json(body)?
        } else {
            FormData::from_urlencoded(body)?
        };
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormData {
        &mut self.form
    }

    /// Whether the request carries `X-Requested-With: XMLHttpRequest`
    pub fn is_xhr(&self) -> bool {
        self.headers
            .get(X_REQUESTED_WITH)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("XMLHttpRequest"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencoded() {
        let data = FormData::from_urlencoded(b"name=danny&csrf=abc&tag=a&tag=b").unwrap();

        assert_eq!(data.get("name"), Some("danny"));
        assert_eq!(data.get("csrf"), Some("abc"));
        assert_eq!(data.get_all("tag"), vec!["a", "b"]);
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn test_json_body() {
        let data =
            FormData::from_json(br#"{"name": "danny", "age": 30, "tags": ["a", "b"], "x": null}"#)
                .unwrap();

        assert_eq!(data.get("name"), Some("danny"));
        assert_eq!(data.get("age"), Some("30"));
        assert_eq!(data.get_all("tags"), vec!["a", "b"]);
        assert!(!data.contains("x"));
        assert!(FormData::from_json(b"[1]").is_err());
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut data: FormData = [("tag", "a"), ("tag", "b")].into_iter().collect();
        data.set("tag", "c");

        assert_eq!(data.get_all("tag"), vec!["c"]);
        data.remove("tag");
        assert!(data.is_empty());
    }

    #[test]
    fn test_with_body_uses_content_type() {
        let request = FormRequest::new(Method::POST, "/ajax/")
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(br#"{"name": "danny"}"#)
            .unwrap();
        assert_eq!(request.form().get("name"), Some("danny"));

        let request = FormRequest::new(Method::POST, "/")
            .with_body(b"name=danny")
            .unwrap();
        assert_eq!(request.form().get("name"), Some("danny"));
    }

    #[test]
    fn test_is_xhr() {
        assert!(!FormRequest::get("/").is_xhr());
        assert!(FormRequest::get("/").xhr().is_xhr());

        let lower = FormRequest::get("/")
            .with_header(X_REQUESTED_WITH, HeaderValue::from_static("xmlhttprequest"));
        assert!(lower.is_xhr());

        let other = FormRequest::get("/")
            .with_header(X_REQUESTED_WITH, HeaderValue::from_static("fetch"));
        assert!(!other.is_xhr());
    }
}
