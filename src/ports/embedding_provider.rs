//! Embedding Provider Port - interface to the external embedding service.
//!
//! A provider turns an ordered list of texts into an ordered list of
//! fixed-dimension vectors, one per input. Providers own their own
//! batching and rate-limit pacing; callers hand over the full list.

use async_trait::async_trait;
use thiserror::Error;

/// Port for text embedding.
///
/// Implementations connect to external embedding services (or a
/// deterministic in-process model for tests) and must preserve input
/// order in the returned vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds the given texts, returning one vector per input in the
    /// same order. An empty input yields an empty output without any
    /// provider call.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Failures while talking to the embedding provider.
///
/// All variants are recoverable per call; no retry policy is applied
/// here, callers decide whether to retry.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    #[error("embedding provider rejected the credential")]
    AuthenticationFailed,

    #[error("embedding provider rate limit hit")]
    RateLimited,

    #[error("embedding request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("network error reaching embedding provider: {0}")]
    Network(String),
}
