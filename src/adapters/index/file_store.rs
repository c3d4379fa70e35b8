//! File-based Vector Index Adapter
//!
//! Persists each collection as one JSON file under a base directory, so
//! a process restart can reuse the embedded vectors without re-embedding.
//! Search is an exhaustive scan; the knowledge base is small enough that
//! an approximate index would be overkill.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::retrieval::EmbeddingRecord;
use crate::ports::{DistanceMetric, IndexHit, VectorIndexError, VectorIndexStore};

/// On-disk shape of one collection.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCollection {
    metric: DistanceMetric,
    records: Vec<EmbeddingRecord>,
}

/// File-backed vector index store.
#[derive(Debug, Clone)]
pub struct FileVectorIndex {
    base_path: PathBuf,
}

impl FileVectorIndex {
    /// Creates a store rooted at the given directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.json"))
    }

    async fn read_collection(&self, name: &str) -> Result<StoredCollection, VectorIndexError> {
        let path = self.collection_path(name);
        if !path.exists() {
            return Err(VectorIndexError::CollectionNotFound(name.to_string()));
        }

        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| VectorIndexError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| VectorIndexError::Serialization(e.to_string()))
    }

    async fn write_collection(
        &self,
        name: &str,
        collection: &StoredCollection,
    ) -> Result<(), VectorIndexError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| VectorIndexError::Io(e.to_string()))?;

        let raw = serde_json::to_string(collection)
            .map_err(|e| VectorIndexError::Serialization(e.to_string()))?;
        fs::write(self.collection_path(name), raw)
            .await
            .map_err(|e| VectorIndexError::Io(e.to_string()))
    }
}

#[async_trait]
impl VectorIndexStore for FileVectorIndex {
    async fn create(&self, name: &str, metric: DistanceMetric) -> Result<(), VectorIndexError> {
        self.write_collection(
            name,
            &StoredCollection {
                metric,
                records: Vec::new(),
            },
        )
        .await
    }

    async fn count(&self, name: &str) -> Result<Option<usize>, VectorIndexError> {
        match self.read_collection(name).await {
            Ok(collection) => Ok(Some(collection.records.len())),
            Err(VectorIndexError::CollectionNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, name: &str) -> Result<(), VectorIndexError> {
        let path = self.collection_path(name);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| VectorIndexError::Io(e.to_string()))?;
        }
        Ok(())
    }

    async fn add(
        &self,
        name: &str,
        records: Vec<EmbeddingRecord>,
    ) -> Result<(), VectorIndexError> {
        let mut collection = self.read_collection(name).await?;

        if let Some(first) = collection.records.first().or(records.first()) {
            let expected = first.vector.len();
            for record in &records {
                if record.vector.len() != expected {
                    return Err(VectorIndexError::DimensionMismatch {
                        expected,
                        actual: record.vector.len(),
                    });
                }
            }
        }

        collection.records.extend(records);
        self.write_collection(name, &collection).await
    }

    async fn query(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<IndexHit>, VectorIndexError> {
        let collection = self.read_collection(name).await?;

        if let Some(first) = collection.records.first() {
            if first.vector.len() != vector.len() {
                return Err(VectorIndexError::DimensionMismatch {
                    expected: first.vector.len(),
                    actual: vector.len(),
                });
            }
        }

        let mut hits: Vec<IndexHit> = collection
            .records
            .iter()
            .map(|record| IndexHit {
                entry_id: record.entry_id.clone(),
                distance: distance(collection.metric, vector, &record.vector),
                payload: record.payload.clone(),
            })
            .collect();

        // Stable sort: equal distances keep knowledge-base insertion order.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        Ok(hits)
    }
}

fn distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f64 {
    match metric {
        DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
    }
}

/// Cosine similarity in [-1, 1]; zero-magnitude vectors compare as 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::retrieval::EntryPayload;
    use tempfile::TempDir;

    fn record(id: &str, vector: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord {
            entry_id: id.to_string(),
            vector,
            composite_text: format!("text for {id}"),
            payload: EntryPayload {
                service: "Login".to_string(),
                category: "Login".to_string(),
                question: format!("question {id}"),
                answer: format!("answer {id}"),
            },
        }
    }

    #[tokio::test]
    async fn count_is_none_before_create() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        assert_eq!(store.count("kb").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_add_count_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());

        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        assert_eq!(store.count("kb").await.unwrap(), Some(0));

        store
            .add("kb", vec![record("a", vec![1.0, 0.0]), record("b", vec![0.0, 1.0])])
            .await
            .unwrap();
        assert_eq!(store.count("kb").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn persists_across_store_instances() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileVectorIndex::new(dir.path());
            store.create("kb", DistanceMetric::Cosine).await.unwrap();
            store.add("kb", vec![record("a", vec![1.0, 0.0])]).await.unwrap();
        }

        let reopened = FileVectorIndex::new(dir.path());
        assert_eq!(reopened.count("kb").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn query_ranks_by_ascending_distance() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        store
            .add(
                "kb",
                vec![
                    record("far", vec![-1.0, 0.0]),
                    record("near", vec![1.0, 0.0]),
                    record("mid", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        let hits = store.query("kb", &[1.0, 0.0], 3).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(hits[0].distance < hits[1].distance);
        assert_eq!(hits[0].payload.question, "question near");
    }

    #[tokio::test]
    async fn query_ties_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        store
            .add(
                "kb",
                vec![
                    record("first", vec![0.0, 1.0]),
                    record("second", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        let hits = store.query("kb", &[0.0, 1.0], 2).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.entry_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn query_truncates_to_k() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        store
            .add(
                "kb",
                (0..10).map(|i| record(&format!("r{i}"), vec![1.0, i as f32])).collect(),
            )
            .await
            .unwrap();

        let hits = store.query("kb", &[1.0, 0.0], 3).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn create_replaces_existing_collection() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        store.add("kb", vec![record("a", vec![1.0, 0.0])]).await.unwrap();

        store.create("kb", DistanceMetric::Cosine).await.unwrap();
        assert_eq!(store.count("kb").await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();

        store.delete("kb").await.unwrap();
        assert_eq!(store.count("kb").await.unwrap(), None);
        // Deleting an absent collection stays quiet.
        store.delete("kb").await.unwrap();
    }

    #[tokio::test]
    async fn add_rejects_mixed_dimensions() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        store.create("kb", DistanceMetric::Cosine).await.unwrap();

        let result = store
            .add("kb", vec![record("a", vec![1.0, 0.0]), record("b", vec![1.0])])
            .await;
        assert!(matches!(result, Err(VectorIndexError::DimensionMismatch { .. })));
    }

    #[tokio::test]
    async fn query_missing_collection_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileVectorIndex::new(dir.path());
        let result = store.query("kb", &[1.0], 1).await;
        assert!(matches!(result, Err(VectorIndexError::CollectionNotFound(_))));
    }

    #[test]
    fn cosine_similarity_bounds() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
