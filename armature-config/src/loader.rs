// Configuration file loaders

use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    /// Detect the format of `path` from its extension (`.env` files included)
    pub fn detect(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file name found".to_string()))?;

        if name == ".env" {
            return Ok(FileFormat::Env);
        }

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))
    }
}

/// Parses settings files into a flat key/value table.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: &Path) -> Result<Self> {
        Ok(Self::new(FileFormat::detect(path)?))
    }

    /// Load settings from file
    pub fn load_file(&self, path: &Path) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Parse settings from a string. The document must be a table at the top.
    pub fn parse(&self, content: &str) -> Result<Map<String, Value>> {
        let value = match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
            FileFormat::Toml => {
                let table: toml::Table = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
                serde_json::to_value(table)
                    .map_err(|e| ConfigError::SerializationError(e.to_string()))?
            }
            FileFormat::Env => Value::Object(parse_env(content)),
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(ConfigError::ParseError(format!(
                "expected a table of settings, found {}",
                other
            ))),
        }
    }
}

fn parse_env(content: &str) -> Map<String, Value> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), Value::String(value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let map = loader
            .parse(r#"{"CSRF_ENABLED": false, "CSRF_SESSION_KEY": "_t"}"#)
            .unwrap();

        assert_eq!(map.get("CSRF_ENABLED"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let map = loader
            .parse(
                r#"
                CSRF_ENABLED = true
                CSRF_SESSION_KEY = "_csrf_token"
                "#,
            )
            .unwrap();

        assert_eq!(map.get("CSRF_ENABLED"), Some(&Value::Bool(true)));
        assert_eq!(
            map.get("CSRF_SESSION_KEY"),
            Some(&Value::String("_csrf_token".to_string()))
        );
    }

    #[test]
    fn test_parse_env() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let map = loader
            .parse(
                r#"
                CSRF_ENABLED=0
                # Comment
                CSRF_SESSION_KEY="quoted key"
                "#,
            )
            .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("CSRF_SESSION_KEY"),
            Some(&Value::String("quoted key".to_string()))
        );
    }

    #[test]
    fn test_non_table_rejected() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(matches!(
            loader.parse("[1, 2, 3]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("unknown"), None);
        assert_eq!(
            FileFormat::detect(Path::new("config/.env")).unwrap(),
            FileFormat::Env
        );
        assert!(FileFormat::detect(Path::new("settings")).is_err());
    }
}
