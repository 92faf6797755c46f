// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use tracing::trace;

/// Environment variable loader.
///
/// Keys are normalized to upper case. With a prefix, only variables starting
/// with `PREFIX_` are picked up and the prefix is stripped, so
/// `MYAPP_CSRF_ENABLED` becomes `CSRF_ENABLED`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.map(|p| p.trim_end_matches('_').to_uppercase()),
        }
    }

    /// Load matching variables from the process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.load_from_os(env::vars_os()))
    }

    fn load_from_os<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut skipped = 0usize;
        let utf8 = vars.into_iter().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                _ => {
                    skipped += 1;
                    None
                }
            }
        });
        let loaded = self.load_from(utf8);

        if skipped > 0 {
            trace!(skipped, "Skipped non UTF-8 environment entries");
        }
        loaded
    }

    /// Load matching variables from an explicit list of pairs
    pub fn load_from<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| self.strip(&key).map(|k| (k, value)))
            .collect()
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Variable name for `key` including the prefix
    pub fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    fn strip(&self, key: &str) -> Option<String> {
        let key = key.to_uppercase();
        match self.prefix {
            Some(ref prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty())
                .map(str::to_string),
            None => Some(key),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
