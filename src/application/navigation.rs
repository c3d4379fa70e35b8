//! Navigation Service - session lifecycle and the chat contract.
//!
//! Thin orchestration over the domain state machine: load the session,
//! apply the action, store the mutated session back. The knowledge base
//! is shared and read-only; no embedding dependency here.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::knowledge::KnowledgeBase;
use crate::domain::navigation::{
    apply, HistoryEntry, NavigationAction, NavigationError, NavigationReply, Session,
    NavigationState, UserInfo,
};
use crate::ports::SessionStore;

/// Response for a freshly created session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStarted {
    pub session_id: SessionId,
    pub message: String,
    pub state: NavigationState,
    pub services: Vec<String>,
}

/// Read-only view of a session for the session inspection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub name: String,
    pub phone: String,
    pub state: NavigationState,
    pub current_service: Option<String>,
    pub current_category: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub created_at: String,
}

/// Drives the guided flow for all sessions.
pub struct NavigationService {
    knowledge: Arc<KnowledgeBase>,
    sessions: Arc<dyn SessionStore>,
}

impl NavigationService {
    pub fn new(knowledge: Arc<KnowledgeBase>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            knowledge,
            sessions,
        }
    }

    /// Validates user details and creates a session at the initial state.
    pub async fn start_session(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<SessionStarted, NavigationError> {
        let user = UserInfo::new(name, phone)?;
        let session = Session::new(user);
        let session_id = session.id();
        let welcome = format!("Welcome, {}! How can I help you today?", session.user().name());

        self.sessions
            .put(session)
            .await
            .map_err(|e| NavigationError::validation("session", e.to_string()))?;

        debug!(%session_id, "session started");
        Ok(SessionStarted {
            session_id,
            message: welcome,
            state: NavigationState::ServiceSelection,
            services: self.knowledge.services(),
        })
    }

    /// Applies one navigation action to the identified session.
    pub async fn chat(
        &self,
        session_id: SessionId,
        action: NavigationAction,
    ) -> Result<NavigationReply, NavigationError> {
        let mut session = self.load(session_id).await?;

        let reply = apply(&self.knowledge, &mut session, action)?;

        // Store the mutated aggregate back so the next call sees it.
        self.sessions
            .put(session)
            .await
            .map_err(|e| NavigationError::validation("session", e.to_string()))?;

        Ok(reply)
    }

    /// Returns a read-only view of a session.
    pub async fn get_session(&self, session_id: SessionId) -> Result<SessionView, NavigationError> {
        let session = self.load(session_id).await?;

        Ok(SessionView {
            name: session.user().name().to_string(),
            phone: session.user().phone().to_string(),
            state: session.state(),
            current_service: session.current_service().map(String::from),
            current_category: session.current_category().map(String::from),
            history: session.history().to_vec(),
            created_at: session.created_at().to_rfc3339(),
        })
    }

    async fn load(&self, session_id: SessionId) -> Result<Session, NavigationError> {
        self.sessions
            .get(session_id)
            .await
            .map_err(|e| NavigationError::validation("session", e.to_string()))?
            .ok_or(NavigationError::SessionNotFound(session_id))
    }
}
