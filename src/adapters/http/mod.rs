//! HTTP transport adapter.
//!
//! Thin surface over the application services: DTOs decouple the wire
//! contract from domain types, handlers translate errors into status
//! codes, and all decisions stay in the layers below.

mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::api_routes;
