//! Ports: trait boundaries between the application core and adapters.

mod embedding_provider;
mod session_store;
mod vector_index;

pub use embedding_provider::{EmbeddingError, EmbeddingProvider};
pub use session_store::{SessionStore, SessionStoreError};
pub use vector_index::{DistanceMetric, IndexHit, VectorIndexError, VectorIndexStore};
