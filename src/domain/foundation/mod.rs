//! Shared value objects used across domain modules.

mod ids;
mod timestamp;

pub use ids::SessionId;
pub use timestamp::Timestamp;
