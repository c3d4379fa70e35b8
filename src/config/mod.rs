//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `SEVA_GUIDE`
//! prefix; nested values use `__` as the separator.
//!
//! # Example
//!
//! ```no_run
//! use seva_guide::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod embedding;
mod error;
mod index;
mod server;

pub use embedding::EmbeddingConfig;
pub use error::{ConfigError, ValidationError};
pub use index::{IndexConfig, KnowledgeConfig};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Embedding provider configuration (Gemini)
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Vector index configuration (data dir, collection)
    #[serde(default)]
    pub index: IndexConfig,

    /// Knowledge base configuration (source file)
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present (development convenience), then
    /// reads variables like `SEVA_GUIDE__SERVER__PORT=8080` and
    /// `SEVA_GUIDE__EMBEDDING__GEMINI_API_KEY=...`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SEVA_GUIDE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing embedding credential fails here, before any request is
    /// served: retrieval cannot function without it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.embedding.validate()?;
        self.index.validate()?;
        self.knowledge.validate()?;
        Ok(())
    }
}
