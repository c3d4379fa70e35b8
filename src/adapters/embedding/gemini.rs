//! Gemini Embedding Provider - implementation of EmbeddingProvider for
//! the Gemini embedding REST API.
//!
//! Uses the `batchEmbedContents` endpoint. Inputs are split into fixed
//! batches with a short pause between them to stay under the provider's
//! rate limits; the pacing is an operational necessity, not part of the
//! embedding contract.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-embedding-001")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = GeminiEmbedding::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::ports::{EmbeddingError, EmbeddingProvider};

/// Texts per request, chosen to stay under the provider's rate limits.
const BATCH_SIZE: usize = 20;

/// Pause between consecutive batch requests.
const BATCH_PAUSE: Duration = Duration::from_millis(500);

/// Configuration for the Gemini embedding provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Embedding model name.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-embedding-001".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL (useful for test doubles).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini embedding API provider.
pub struct GeminiEmbedding {
    config: GeminiConfig,
    client: Client,
}

impl GeminiEmbedding {
    /// Creates a new provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Builds the batch embedding endpoint URL, key appended as a query
    /// parameter per the API's authentication scheme.
    fn batch_url(&self) -> String {
        format!(
            "{}/models/{}:batchEmbedContents?key={}",
            self.config.base_url,
            self.config.model,
            self.config.api_key()
        )
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: format!("models/{}", self.config.model),
                    content: Content {
                        parts: vec![Part { text: text.clone() }],
                    },
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.batch_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    EmbeddingError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => EmbeddingError::AuthenticationFailed,
                429 => EmbeddingError::RateLimited,
                _ => EmbeddingError::Provider(format!("status {status}: {body}")),
            });
        }

        let parsed: BatchEmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("malformed response: {e}")))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::Provider(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }

        Ok(parsed.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedding {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        let batches: Vec<&[String]> = texts.chunks(BATCH_SIZE).collect();
        let batch_count = batches.len();

        for (i, batch) in batches.into_iter().enumerate() {
            debug!(batch = i + 1, of = batch_count, size = batch.len(), "embedding batch");
            vectors.extend(self.embed_batch(batch).await?);
            if i + 1 < batch_count {
                sleep(BATCH_PAUSE).await;
            }
        }

        Ok(vectors)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}
