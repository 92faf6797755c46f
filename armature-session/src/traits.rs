//! Session data and the session store trait.

use crate::error::{SessionError, SessionResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Per-user session state.
///
/// A key/value map persisted across requests by a [`SessionStore`]. Values are
/// stored as JSON so any serializable type fits, but form code only ever
/// stores strings here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// Session data as key-value pairs
    pub data: HashMap<String, serde_json::Value>,
    /// Session creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last access timestamp
    pub last_accessed_at: DateTime<Utc>,
    /// Session expiration timestamp
    pub expires_at: DateTime<Utc>,
    #[serde(skip)]
    modified: bool,
}

impl Session {
    /// Create a new session with the given ID and TTL.
    pub fn new(id: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            data: HashMap::new(),
            created_at: now,
            last_accessed_at: now,
            expires_at: expiry_after(now, ttl),
            modified: false,
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether data changed since the session was loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modified flag, typically after the store persisted it.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Get a value from the session data.
    ///
    /// Values that do not deserialize into `T` read as absent; use
    /// [`Session::try_get`] to tell the two apart.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.try_get(key).ok().flatten()
    }

    /// Get a value, failing when it is present but not a `T`.
    pub fn try_get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> SessionResult<Option<T>> {
        self.data
            .get(key)
            .map(|v| decode(key, v.clone()))
            .transpose()
    }

    /// Get a value, falling back to `default` when absent.
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a value in the session data.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> SessionResult<()> {
        let json_value =
            serde_json::to_value(value).map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.data.insert(key.to_string(), json_value);
        self.modified = true;
        Ok(())
    }

    /// Read and remove a value in one step.
    ///
    /// The key is removed even if its value does not deserialize into `T`.
    pub fn pop<T: for<'de> Deserialize<'de>>(&mut self, key: &str) -> Option<T> {
        self.try_pop(key).ok().flatten()
    }

    /// Like [`Session::pop`], but reports a mistyped value as an error.
    ///
    /// The key is removed either way.
    pub fn try_pop<T: for<'de> Deserialize<'de>>(
        &mut self,
        key: &str,
    ) -> SessionResult<Option<T>> {
        self.remove(key).map(|v| decode(key, v)).transpose()
    }

    /// Remove a value from the session data.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Check if a key exists in the session data.
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get all keys in the session data.
    pub fn keys(&self) -> Vec<&String> {
        self.data.keys().collect()
    }

    /// Clear all session data.
    pub fn clear(&mut self) {
        if !self.data.is_empty() {
            self.modified = true;
        }
        self.data.clear();
    }

    /// Update the last accessed timestamp.
    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Extend the session expiration.
    pub fn extend(&mut self, ttl: Duration) {
        self.expires_at = expiry_after(Utc::now(), ttl);
    }
}

fn decode<T: for<'de> Deserialize<'de>>(key: &str, value: serde_json::Value) -> SessionResult<T> {
    serde_json::from_value(value).map_err(|e| SessionError::Deserialization {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// `now + ttl`, saturating at the latest representable instant.
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Session store trait for different storage backends.
///
/// The store persists whole [`Session`] values between requests. Request
/// handling itself works on a loaded `&mut Session` and calls
/// [`SessionStore::save`] once it is done.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session.
    ///
    /// `ttl` overrides the store's default TTL when given.
    async fn create(&self, ttl: Option<Duration>) -> SessionResult<Session>;

    /// Get a session by ID.
    ///
    /// Returns `Ok(None)` if the session is unknown or expired.
    async fn get(&self, session_id: &str) -> SessionResult<Option<Session>>;

    /// Save/update a session.
    async fn save(&self, session: &Session) -> SessionResult<()>;

    /// Delete a session.
    async fn delete(&self, session_id: &str) -> SessionResult<()>;

    /// Check if a session exists and is valid.
    async fn exists(&self, session_id: &str) -> SessionResult<bool>;

    /// Clear all sessions.
    async fn clear_all(&self) -> SessionResult<()>;

    /// Get the number of stored sessions.
    async fn count(&self) -> SessionResult<usize>;

    /// Remove expired sessions, returning how many were dropped.
    async fn cleanup_expired(&self) -> SessionResult<usize>;

    /// Load a session or start a fresh one when it is missing or expired.
    async fn load_or_create(&self, session_id: Option<&str>) -> SessionResult<Session> {
        if let Some(id) = session_id {
            if let Some(session) = self.get(id).await? {
                return Ok(session);
            }
        }
        self.create(None).await
    }
}

/// Generate a new unique session ID.
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("test", Duration::from_secs(60))
    }

    #[test]
    fn test_set_get_pop() {
        let mut session = session();
        session.set("_csrf_token", "abc").unwrap();

        assert_eq!(session.get::<String>("_csrf_token").as_deref(), Some("abc"));
        assert_eq!(session.pop::<String>("_csrf_token").as_deref(), Some("abc"));
        assert!(!session.contains("_csrf_token"));
        assert_eq!(session.pop::<String>("_csrf_token"), None);
    }

    #[test]
    fn test_get_or_default() {
        let session = session();
        assert_eq!(session.get_or("missing", "fallback".to_string()), "fallback");
    }

    #[test]
    fn test_pop_removes_mistyped_value() {
        let mut session = session();
        session.set("count", 5).unwrap();

        assert_eq!(session.pop::<String>("count"), None);
        assert!(!session.contains("count"));
    }

    #[test]
    fn test_try_get_reports_mistyped_value() {
        let mut session = session();
        session.set("_csrf_token", 42).unwrap();

        assert_eq!(session.get::<String>("_csrf_token"), None);
        assert!(matches!(
            session.try_get::<String>("_csrf_token"),
            Err(SessionError::Deserialization { key, .. }) if key == "_csrf_token"
        ));
        assert_eq!(session.try_get::<u32>("_csrf_token").unwrap(), Some(42));
        assert_eq!(session.try_get::<String>("missing").unwrap(), None);

        assert!(matches!(
            session.try_pop::<String>("_csrf_token"),
            Err(SessionError::Deserialization { .. })
        ));
        assert!(!session.contains("_csrf_token"));
        assert_eq!(session.try_pop::<String>("_csrf_token").unwrap(), None);
    }

    #[test]
    fn test_modified_flag() {
        let mut session = session();
        assert!(!session.is_modified());

        session.remove("missing");
        assert!(!session.is_modified());

        session.set("key", "value").unwrap();
        assert!(session.is_modified());

        session.mark_saved();
        session.clear();
        assert!(session.is_modified());
    }

    #[test]
    fn test_expiry() {
        let mut session = Session::new("old", Duration::ZERO);
        session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        assert!(session.is_expired());

        session.extend(Duration::from_secs(60));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let ttl = Duration::from_secs(10u64.pow(13));

        let mut session = Session::new("forever", ttl);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!session.is_expired());

        session.extend(Duration::MAX);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_generate_session_id_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
