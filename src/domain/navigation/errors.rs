//! Navigation-specific error types.
//!
//! Every variant is caller-correctable: the transport maps them to 4xx
//! responses and the process never crashes on one.

use thiserror::Error;

use crate::domain::foundation::SessionId;

/// Errors raised by session creation and navigation actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Unknown session id; the caller must start a new session.
    #[error("session {0} not found; please start a new session")]
    SessionNotFound(SessionId),

    /// The selected value is not among the currently valid choices.
    #[error("'{value}' is not a valid {kind}")]
    InvalidSelection { kind: &'static str, value: String },

    /// A category was selected before any service.
    #[error("no service selected yet")]
    MissingPrecedingSelection,

    /// The requested question id does not exist.
    #[error("question '{0}' not found")]
    QuestionNotFound(String),

    /// The action name is not part of the navigation contract.
    #[error("unrecognized action '{0}'")]
    InvalidAction(String),

    /// User details failed validation at session creation.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl NavigationError {
    pub fn invalid_selection(kind: &'static str, value: impl Into<String>) -> Self {
        NavigationError::InvalidSelection {
            kind,
            value: value.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        NavigationError::Validation {
            field,
            message: message.into(),
        }
    }
}
