//! Adapters: concrete implementations of the ports plus the HTTP surface.

pub mod embedding;
pub mod http;
pub mod index;
pub mod session;
