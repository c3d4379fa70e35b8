//! Vector Index Port - persistent similarity index over embedding records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::retrieval::{EmbeddingRecord, EntryPayload};

/// Distance metric a collection is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine distance `1 - cos(a, b)`, range [0, 2].
    Cosine,
}

/// Raw query result: id, distance under the collection metric, payload.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub entry_id: String,
    pub distance: f64,
    pub payload: EntryPayload,
}

/// Port for the persistent vector index store.
///
/// Collections are named; records are keyed by entry id within a
/// collection. `count` returning `None` means the collection does not
/// exist yet, which is the normal first-run case and not an error.
#[async_trait]
pub trait VectorIndexStore: Send + Sync {
    /// Creates an empty collection with the given metric, replacing any
    /// existing collection of the same name.
    async fn create(&self, name: &str, metric: DistanceMetric) -> Result<(), VectorIndexError>;

    /// Returns the record count, or `None` when the collection is absent.
    async fn count(&self, name: &str) -> Result<Option<usize>, VectorIndexError>;

    /// Deletes a collection. Deleting an absent collection is a no-op.
    async fn delete(&self, name: &str) -> Result<(), VectorIndexError>;

    /// Appends records to a collection and persists them.
    async fn add(
        &self,
        name: &str,
        records: Vec<EmbeddingRecord>,
    ) -> Result<(), VectorIndexError>;

    /// Returns the `k` nearest records by ascending distance. Ties keep
    /// insertion order. Never mutates the collection.
    async fn query(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<IndexHit>, VectorIndexError>;
}

/// Failures in the vector index store.
#[derive(Debug, Clone, Error)]
pub enum VectorIndexError {
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("vector dimension mismatch: collection has {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("index I/O error: {0}")]
    Io(String),

    #[error("index serialization failed: {0}")]
    Serialization(String),
}
