//! Knowledge base module.
//!
//! The knowledge base is an externally supplied, read-only collection of
//! FAQ entries organized as service -> category -> question. Both the
//! navigation flow and the retrieval engine read it; neither mutates it.

mod base;
mod entry;

pub use base::{KnowledgeBase, KnowledgeError, QuestionRef};
pub use entry::{KnowledgeEntry, OVERVIEW_CATEGORY, OVERVIEW_ID_SUFFIX};
