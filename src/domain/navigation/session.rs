//! Session aggregate.
//!
//! Sessions live only in process memory and are owned exclusively by the
//! process: created once, mutated only by calls bearing their id,
//! destroyed at process exit.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::state::NavigationState;
use super::user::UserInfo;

/// One viewed question, recorded for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question_id: String,
    pub question: String,
    pub timestamp: Timestamp,
}

/// Per-user conversational state for the guided flow.
///
/// # Invariants
///
/// - `history` is append-only; entries are never rewritten or trimmed
/// - `current_category` is only meaningful while `current_service` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    user: UserInfo,
    state: NavigationState,
    current_service: Option<String>,
    current_category: Option<String>,
    history: Vec<HistoryEntry>,
    created_at: Timestamp,
}

impl Session {
    /// Creates a fresh session at the initial state.
    pub fn new(user: UserInfo) -> Self {
        Self {
            id: SessionId::new(),
            user,
            state: NavigationState::ServiceSelection,
            current_service: None,
            current_category: None,
            history: Vec::new(),
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_service(&self) -> Option<&str> {
        self.current_service.as_deref()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Moves into category selection for the given service.
    pub fn enter_service(&mut self, service: String) {
        self.current_service = Some(service);
        self.current_category = None;
        self.state = NavigationState::CategorySelection;
    }

    /// Moves into question selection for the given category.
    pub fn enter_category(&mut self, category: String) {
        self.current_category = Some(category);
        self.state = NavigationState::QuestionSelection;
    }

    /// Moves into the answer state and records the viewed question.
    ///
    /// This is the only mutation with audit value: the history entry is
    /// immutable once appended.
    pub fn record_answer(&mut self, question_id: String, question: String) {
        self.history.push(HistoryEntry {
            question_id,
            question,
            timestamp: Timestamp::now(),
        });
        self.state = NavigationState::Answer;
    }

    /// Steps one level back, returning the state to re-render.
    ///
    /// From the initial state `back` is a no-op that re-renders it.
    pub fn go_back(&mut self) -> NavigationState {
        match self.state {
            NavigationState::Answer => {
                // Keeps service and category so the question menu renders.
                self.state = NavigationState::QuestionSelection;
            }
            NavigationState::QuestionSelection => {
                self.current_category = None;
                self.state = NavigationState::CategorySelection;
            }
            NavigationState::CategorySelection => {
                self.current_service = None;
                self.state = NavigationState::ServiceSelection;
            }
            NavigationState::ServiceSelection => {}
        }
        self.state
    }
}
