//! Domain layer: knowledge base, navigation state machine, retrieval types.

pub mod foundation;
pub mod knowledge;
pub mod navigation;
pub mod retrieval;
