//! Retrieval types: persisted embedding records and scored search hits.

mod record;
mod score;

pub use record::{EmbeddingRecord, EntryPayload, SearchHit};
pub use score::{similarity_from_cosine_distance, round_score};
