//! Navigation actions and the reply payload they produce.

use serde::Serialize;

use crate::domain::knowledge::QuestionRef;

use super::errors::NavigationError;
use super::state::NavigationState;

/// A user action against the guided flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    SelectService(String),
    SelectCategory(String),
    SelectQuestion(String),
    Back,
}

impl NavigationAction {
    /// Parses the wire `{action, value?}` pair.
    ///
    /// Unknown action names fail with `InvalidAction`; a select action
    /// without a value fails as an invalid (empty) selection.
    pub fn parse(action: &str, value: Option<String>) -> Result<Self, NavigationError> {
        let require_value = |kind: &'static str, value: Option<String>| {
            value.ok_or(NavigationError::invalid_selection(kind, ""))
        };

        match action {
            "select_service" => Ok(Self::SelectService(require_value("service", value)?)),
            "select_category" => Ok(Self::SelectCategory(require_value("category", value)?)),
            "select_question" => Ok(Self::SelectQuestion(require_value("question", value)?)),
            "back" => Ok(Self::Back),
            other => Err(NavigationError::InvalidAction(other.to_string())),
        }
    }
}

/// State-specific payload returned after every navigation action.
///
/// Exactly one of `services`, `categories`, or `questions` is populated,
/// matching the resulting state; `message` carries the display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationReply {
    pub state: NavigationState,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl NavigationReply {
    pub(crate) fn new(state: NavigationState, message: String) -> Self {
        Self {
            state,
            message,
            services: None,
            categories: None,
            questions: None,
            service: None,
            category: None,
            question: None,
        }
    }

    pub(crate) fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = Some(services);
        self
    }

    pub(crate) fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub(crate) fn with_questions(mut self, questions: Vec<QuestionRef>) -> Self {
        self.questions = Some(questions);
        self
    }

    pub(crate) fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub(crate) fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }
}
