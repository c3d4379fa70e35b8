//! Knowledge entry record.

use serde::{Deserialize, Serialize};

/// Reserved category label for service-level summary entries.
///
/// Entries in this category are never shown as selectable menu items;
/// their answer text is surfaced alongside the category listing instead.
pub const OVERVIEW_CATEGORY: &str = "Overview";

/// Id suffix that marks a service's overview entry (e.g. `login_000`).
pub const OVERVIEW_ID_SUFFIX: &str = "_000";

/// A single immutable FAQ entry in the knowledge base.
///
/// # Invariants
///
/// - `id` is globally unique across the knowledge base and stable across runs
/// - at most one entry per `service` is the overview entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Unique, stable identifier (e.g. `login_001`).
    pub id: String,

    /// Category-of-services label (e.g. `Login`, `Employment Exchange`).
    pub service: String,

    /// Sub-topic within a service. `Overview` is reserved.
    pub category: String,

    /// Question display text.
    pub question: String,

    /// Answer display text; may contain lightweight markup.
    pub answer: String,

    /// Free-text tags for potential lexical search. Not used by the
    /// guided flow or the retrieval engine.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl KnowledgeEntry {
    /// Returns true when this entry is a service-level overview.
    pub fn is_overview(&self) -> bool {
        self.id.ends_with(OVERVIEW_ID_SUFFIX)
    }

    /// Builds the composite text that is embedded for this entry.
    ///
    /// The format is fixed so re-ingestion produces identical text for
    /// unchanged entries.
    pub fn composite_text(&self) -> String {
        format!(
            "Service: {}. Category: {}. Question: {}. Answer: {}",
            self.service, self.category, self.question, self.answer
        )
    }
}
