//! Request handlers, one module per resource.
//!
//! Handlers decode the request, call exactly one service operation and encode
//! the result. They hold no state between requests.

pub mod error;
pub mod events;
pub mod extractors;
pub mod health;
pub mod users;

pub use error::{ApiError, ErrorBody};

/// Fallback for paths outside the routing table.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
