//! Embedding provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Embedding provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Gemini API key. Absence is startup-fatal: retrieval cannot
    /// function without a credential.
    pub gemini_api_key: Option<String>,

    /// Embedding model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a credential is configured
    pub fn has_credential(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate embedding configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_credential() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-embedding-001".to_string()
}

fn default_timeout() -> u64 {
    30
}
