//! Session state for Armature forms.
//!
//! A [`Session`] is the per-user key/value map that form helpers read and
//! write during a request (the CSRF token lives here). A [`SessionStore`]
//! persists sessions between requests.
//!
//! # Examples
//!
//! ```
//! use armature_session::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SessionError> {
//!     let store = MemorySessionStore::default();
//!
//!     let mut session = store.create(None).await?;
//!     session.set("_csrf_token", "1f0c")?;
//!     store.save(&session).await?;
//!
//!     // Next request
//!     if let Some(mut session) = store.get(&session.id).await? {
//!         let token: Option<String> = session.pop("_csrf_token");
//!         assert_eq!(token.as_deref(), Some("1f0c"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod memory_session;
pub mod traits;

pub use config::{MAX_SESSION_TTL, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use memory_session::MemorySessionStore;
pub use traits::{Session, SessionStore, generate_session_id};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{MAX_SESSION_TTL, SessionConfig};
    pub use crate::error::{SessionError, SessionResult};
    pub use crate::memory_session::MemorySessionStore;
    pub use crate::traits::{Session, SessionStore, generate_session_id};
}
