//! Embedding provider adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiEmbedding};
pub use mock::MockEmbedding;
