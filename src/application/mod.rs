//! Application layer: orchestration of the two core components.

mod navigation;
mod retrieval;

pub use navigation::{NavigationService, SessionStarted, SessionView};
pub use retrieval::{RetrievalEngine, RetrievalError, DEFAULT_QUERY_LIMIT};
