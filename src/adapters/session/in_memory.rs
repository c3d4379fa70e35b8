//! In-memory session store.
//!
//! Process-lifetime map with no eviction: nothing removes sessions, so
//! memory grows with every session started. A TTL-evicting adapter can
//! replace this one behind the same port when that matters.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::navigation::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// Default [`SessionStore`] backed by a `RwLock`-guarded map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions, for diagnostics.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn put(&self, session: Session) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(session.id(), session);
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }
}
