//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A startup-fatal missing setting, e.g. the embedding credential.
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid embedding timeout")]
    InvalidTimeout,

    #[error("Knowledge base path must not be empty")]
    EmptyKnowledgePath,

    #[error("Index data directory must not be empty")]
    EmptyIndexDir,

    #[error("Index collection name must not be empty")]
    EmptyCollectionName,
}
