//! In-memory session store
//!
//! Uses DashMap for thread-safe concurrent access. Suitable for single-instance
//! deployments and tests; sessions are lost when the process exits.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::traits::{Session, SessionStore, generate_session_id};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// In-memory session store
pub struct MemorySessionStore {
    config: SessionConfig,
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    /// Create a store with the given configuration.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        debug!(namespace = %config.namespace, "Creating in-memory session store");
        Ok(Self {
            config,
            sessions: DashMap::new(),
        })
    }

    /// Store configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn key(&self, session_id: &str) -> SessionResult<String> {
        if session_id.is_empty() {
            return Err(SessionError::InvalidSessionId(
                "session id must not be empty".to_string(),
            ));
        }
        Ok(self.config.session_key(session_id))
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            sessions: DashMap::new(),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, ttl: Option<Duration>) -> SessionResult<Session> {
        let ttl = self.config.effective_ttl(ttl);
        let session = Session::new(generate_session_id(), ttl);
        self.sessions
            .insert(self.key(&session.id)?, session.clone());

        trace!(session_id = %session.id, ttl = ?ttl, "Session created");
        Ok(session)
    }

    async fn get(&self, session_id: &str) -> SessionResult<Option<Session>> {
        let key = self.key(session_id)?;
        let Some(mut session) = self.sessions.get(&key).map(|s| s.value().clone()) else {
            return Ok(None);
        };

        if session.is_expired() {
            trace!(session_id = %session_id, "Session expired on read");
            self.sessions.remove(&key);
            return Ok(None);
        }

        session.touch();
        session.mark_saved();
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> SessionResult<()> {
        let key = self.key(&session.id)?;
        if session.is_expired() {
            return Err(SessionError::Expired(session.id.clone()));
        }

        let mut stored = session.clone();
        stored.mark_saved();
        self.sessions.insert(key, stored);

        trace!(session_id = %session.id, keys = session.data.len(), "Session saved");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> SessionResult<()> {
        let key = self.key(session_id)?;
        self.sessions.remove(&key);
        debug!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    async fn exists(&self, session_id: &str) -> SessionResult<bool> {
        Ok(self.get(session_id).await?.is_some())
    }

    async fn clear_all(&self) -> SessionResult<()> {
        self.sessions.clear();
        debug!("All sessions cleared");
        Ok(())
    }

    async fn count(&self) -> SessionResult<usize> {
        Ok(self.sessions.len())
    }

    async fn cleanup_expired(&self) -> SessionResult<usize> {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        let removed = before.saturating_sub(self.sessions.len());

        debug!(removed, "Expired sessions cleaned up");
        Ok(removed)
    }
}
