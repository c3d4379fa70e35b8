//! Navigation state machine for the guided help flow.
//!
//! A session walks service -> category -> question -> answer, with `back`
//! undoing one level at a time. All transitions are synchronous and pure
//! over the knowledge base; the only externally observable mutation is
//! the append-only question history.

mod action;
mod engine;
mod errors;
mod session;
mod state;
mod user;

pub use action::{NavigationAction, NavigationReply};
pub use engine::apply;
pub use errors::NavigationError;
pub use session::{HistoryEntry, Session};
pub use state::NavigationState;
pub use user::UserInfo;
