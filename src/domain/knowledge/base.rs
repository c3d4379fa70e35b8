//! Knowledge base collection and its derived queries.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use super::entry::{KnowledgeEntry, OVERVIEW_CATEGORY};

/// Errors raised while loading or validating the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse knowledge base: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate entry id '{0}'")]
    DuplicateId(String),

    #[error("service '{0}' has more than one overview entry")]
    DuplicateOverview(String),
}

/// Lightweight (id, question) pair used in question menus.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuestionRef {
    pub id: String,
    pub question: String,
}

/// Read-only, ordered collection of [`KnowledgeEntry`] values.
///
/// Entry order is preserved from the source data; it is the tie-breaking
/// order for search results and the display order for question menus.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Builds a knowledge base from entries, validating its invariants.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeError> {
        let mut ids = BTreeSet::new();
        let mut overview_services = BTreeSet::new();

        for entry in &entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(KnowledgeError::DuplicateId(entry.id.clone()));
            }
            if entry.is_overview() && !overview_services.insert(entry.service.as_str()) {
                return Err(KnowledgeError::DuplicateOverview(entry.service.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Loads the knowledge base from a JSON file (an array of entries).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the knowledge base holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Distinct service names, sorted, no duplicates.
    pub fn services(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.entries.iter().map(|e| e.service.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct category names for a service, sorted.
    ///
    /// The reserved `Overview` category is excluded everywhere: it is a
    /// presentation detail of the category listing, never a selectable
    /// menu item.
    pub fn categories(&self, service: &str) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .entries
            .iter()
            .filter(|e| e.service == service && e.category != OVERVIEW_CATEGORY)
            .map(|e| e.category.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Questions for a (service, category) pair, in source order.
    pub fn questions(&self, service: &str, category: &str) -> Vec<QuestionRef> {
        self.entries
            .iter()
            .filter(|e| e.service == service && e.category == category)
            .map(|e| QuestionRef {
                id: e.id.clone(),
                question: e.question.clone(),
            })
            .collect()
    }

    /// Looks up a single entry by id.
    pub fn entry(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the overview answer for a service, when one exists.
    pub fn overview(&self, service: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.service == service && e.is_overview())
            .map(|e| e.answer.as_str())
    }

    /// Count of entries belonging to a service.
    pub fn question_count(&self, service: &str) -> usize {
        self.entries.iter().filter(|e| e.service == service).count()
    }
}
