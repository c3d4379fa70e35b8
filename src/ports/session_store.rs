//! Session Store Port - lookup and mutation of live sessions.
//!
//! The store is a seam: the default adapter is an in-process map with no
//! eviction (sessions live for the process lifetime by design), but a
//! TTL-evicting cache or external store can be swapped in without
//! touching call sites.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::navigation::Session;

/// Port for session storage, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetches a session snapshot, or `None` for an unknown id.
    async fn get(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Inserts or replaces a session under its own id.
    async fn put(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Removes a session; returns whether it existed.
    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError>;
}

/// Failures in the session store backend.
///
/// The in-memory adapter never fails; the variant exists for external
/// backends behind the same port.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("session store backend error: {0}")]
    Backend(String),
}
