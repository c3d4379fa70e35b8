//! Vector index and knowledge base configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Vector index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Directory where collections are persisted
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Collection name for the knowledge base index
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl IndexConfig {
    /// Validate index configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.trim().is_empty() {
            return Err(ValidationError::EmptyIndexDir);
        }
        if self.collection.trim().is_empty() {
            return Err(ValidationError::EmptyCollectionName);
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            collection: default_collection(),
        }
    }
}

fn default_data_dir() -> String {
    "data/index".to_string()
}

fn default_collection() -> String {
    "seva_knowledge".to_string()
}

/// Knowledge base configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the knowledge base JSON file
    #[serde(default = "default_knowledge_path")]
    pub path: String,
}

impl KnowledgeConfig {
    /// Validate knowledge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::EmptyKnowledgePath);
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
        }
    }
}

fn default_knowledge_path() -> String {
    "data/knowledge_base.json".to_string()
}
