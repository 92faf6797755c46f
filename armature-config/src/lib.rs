//! Application settings for Armature forms.
//!
//! [`AppConfig`] is a string-keyed settings map that is read when a form is
//! constructed. Values can be set in code or loaded from the environment, a
//! `.env` file, TOML or JSON.
//!
//! ```
//! use armature_config::AppConfig;
//!
//! let config = AppConfig::new();
//! config.set("CSRF_ENABLED", false).unwrap();
//!
//! assert_eq!(config.get_bool_opt("CSRF_ENABLED").unwrap(), Some(false));
//! assert_eq!(config.get_bool_opt("MISSING").unwrap(), None);
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Shared application settings.
///
/// Cloning is cheap and clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl AppConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let config = Self::new();
        for (key, value) in pairs {
            config.set(key.as_ref(), value)?;
        }
        Ok(config)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.values.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get_opt(key)?
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    /// Get a configuration value if the key is present
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let values = self.values.read();
        match values.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_opt(key).ok().flatten().unwrap_or(default)
    }

    /// Get a string value
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    /// Get a boolean value
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_bool_opt(key)?
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    /// Get a boolean value if present.
    ///
    /// Besides JSON booleans this accepts `1/true/yes/on` and `0/false/no/off`
    /// (any case) and the numbers 0 and 1, which is what settings loaded from
    /// the environment look like. A JSON `null` reads as absent.
    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>> {
        let values = self.values.read();
        let value = match values.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };

        let flag = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_flag(s),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            _ => None,
        };

        flag.map(Some).ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Remove a key, returning its previous value
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }

    /// Get all configuration keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Copy every value from `other`, overwriting existing keys
    pub fn merge(&self, other: &AppConfig) {
        if Arc::ptr_eq(&self.values, &other.values) {
            return;
        }
        let incoming = other.values.read().clone();
        self.values.write().extend(incoming);
    }

    /// Load variables from the process environment.
    ///
    /// Returns the number of keys loaded.
    pub fn load_env(&self, prefix: Option<&str>) -> Result<usize> {
        let loader = EnvLoader::new(prefix.map(str::to_string));
        let vars = loader.load()?;
        let count = vars.len();

        let mut values = self.values.write();
        for (key, value) in vars {
            values.insert(key, Value::String(value));
        }

        debug!(prefix = ?prefix, count, "Loaded settings from environment");
        Ok(count)
    }

    /// Read a `.env` file into the process environment, then load it.
    ///
    /// A missing default `.env` is not an error; a missing explicit path is.
    pub fn load_dotenv(&self, path: Option<&Path>, prefix: Option<&str>) -> Result<usize> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env(prefix)
    }

    /// Load a settings file, detecting its format from the extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        self.load_file_as(path, FileFormat::detect(path)?)
    }

    /// Load a settings file with an explicit format
    pub fn load_file_as(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<usize> {
        let path = path.as_ref();
        let map = ConfigLoader::new(format).load_file(path)?;
        let count = map.len();
        self.values.write().extend(map);

        debug!(path = %path.display(), count, "Loaded settings file");
        Ok(count)
    }

    /// Load settings from an in-memory document
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<usize> {
        let map = ConfigLoader::new(format).parse(content)?;
        let count = map.len();
        self.values.write().extend(map);
        Ok(count)
    }
}

/// Parse a textual on/off flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
