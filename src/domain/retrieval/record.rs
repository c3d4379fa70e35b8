//! Persisted embedding records and search results.

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::KnowledgeEntry;

/// Display fields carried alongside each vector so query results need no
/// knowledge-base join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPayload {
    pub service: String,
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl From<&KnowledgeEntry> for EntryPayload {
    fn from(entry: &KnowledgeEntry) -> Self {
        Self {
            service: entry.service.clone(),
            category: entry.category.clone(),
            question: entry.question.clone(),
            answer: entry.answer.clone(),
        }
    }
}

/// Derived artifact persisted in the vector index, one per entry.
///
/// `composite_text` is stored so a re-ingestion can compare what was
/// actually embedded; staleness detection itself is count-based only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub entry_id: String,
    pub vector: Vec<f32>,
    pub composite_text: String,
    pub payload: EntryPayload,
}

impl EmbeddingRecord {
    /// Pairs an entry with its embedding vector.
    pub fn new(entry: &KnowledgeEntry, vector: Vec<f32>) -> Self {
        Self {
            entry_id: entry.id.clone(),
            vector,
            composite_text: entry.composite_text(),
            payload: EntryPayload::from(entry),
        }
    }
}

/// One ranked search result with a normalized similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub service: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    /// Similarity in [0, 1], rounded to 4 decimal places. 1.0 means
    /// identical under cosine distance, 0.0 maximally dissimilar.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_captures_composite_text_and_payload() {
        let entry = KnowledgeEntry {
            id: "login_001".to_string(),
            service: "Login".to_string(),
            category: "Login".to_string(),
            question: "How?".to_string(),
            answer: "Like this.".to_string(),
            keywords: vec!["login".to_string()],
        };

        let record = EmbeddingRecord::new(&entry, vec![0.1, 0.2]);

        assert_eq!(record.entry_id, "login_001");
        assert_eq!(record.composite_text, entry.composite_text());
        assert_eq!(record.payload.answer, "Like this.");
        assert_eq!(record.vector, vec![0.1, 0.2]);
    }
}
