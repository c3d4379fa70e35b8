//! Deterministic in-process embedding provider for tests.
//!
//! Builds a bag-of-words vector per text: each lowercased token hashes to
//! a dimension and a sign, the result is L2-normalized. Identical texts
//! embed identically, and texts sharing tokens land closer together,
//! which is enough signal to exercise ranking behavior offline.

use async_trait::async_trait;

use crate::ports::{EmbeddingError, EmbeddingProvider};

/// Vector dimension for the mock model.
const DIMENSION: usize = 32;

/// Deterministic embedding provider with no external dependencies.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedding;

impl MockEmbedding {
    pub fn new() -> Self {
        Self
    }

    fn embed_one(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; DIMENSION];

        for token in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            let hash = fnv1a(token.as_bytes());
            let dim = (hash % DIMENSION as u64) as usize;
            let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
            vector[dim] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedding {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| Self::embed_one(t)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
