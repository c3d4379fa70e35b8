//! Navigation states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a session in the guided flow.
///
/// `Answer` is terminal per cycle but re-enterable: `back` returns to the
/// question menu and the user can pick again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationState {
    ServiceSelection,
    CategorySelection,
    QuestionSelection,
    Answer,
}

impl NavigationState {
    /// Wire name of the state, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationState::ServiceSelection => "service_selection",
            NavigationState::CategorySelection => "category_selection",
            NavigationState::QuestionSelection => "question_selection",
            NavigationState::Answer => "answer",
        }
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
