//! Routing table and middleware stack.
//!
//! Routes come from the fixed [`Endpoint`] set; nothing is registered after
//! the router is built. The resource routes are a child router served both at
//! the root and under the versioned prefix.

use crate::error::ConfigError;
use crate::handlers::{self, events, health, users};
use crate::state::AppState;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{MethodRouter, get, post};
use std::collections::{BTreeMap, HashSet};
use tower::{Layer, ServiceBuilder};
use tower_http::LatencyUnit;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// The router wrapped in trailing-slash normalization, ready to serve.
pub type App = NormalizePath<Router>;

/// Every resource binding the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetUser,
    UserIdMissing,
    CreateUser,
    GetEvent,
    EventIdMissing,
    CreateEvent,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::GetUser,
        Endpoint::UserIdMissing,
        Endpoint::CreateUser,
        Endpoint::GetEvent,
        Endpoint::EventIdMissing,
        Endpoint::CreateEvent,
    ];

    pub fn method(self) -> Method {
        match self {
            Self::GetUser | Self::UserIdMissing | Self::GetEvent | Self::EventIdMissing => {
                Method::GET
            }
            Self::CreateUser | Self::CreateEvent => Method::POST,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::GetUser => "/users/{id}",
            Self::UserIdMissing | Self::CreateUser => "/users",
            Self::GetEvent => "/events/{id}",
            Self::EventIdMissing | Self::CreateEvent => "/events",
        }
    }

    fn method_router(self) -> MethodRouter<AppState> {
        match self {
            Self::GetUser => get(users::get_user_by_id),
            Self::UserIdMissing => get(users::missing_user_id),
            Self::CreateUser => post(users::create_user),
            Self::GetEvent => get(events::get_event_by_id),
            Self::EventIdMissing => get(events::missing_event_id),
            Self::CreateEvent => post(events::create_event),
        }
    }
}

/// Reject tables with duplicate (method, path) pairs or relative paths.
pub fn validate_bindings(endpoints: &[Endpoint]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for endpoint in endpoints {
        if !endpoint.path().starts_with('/') {
            return Err(ConfigError::RouteBinding(format!(
                "route path '{}' must start with '/'",
                endpoint.path()
            )));
        }
        if !seen.insert((endpoint.method(), endpoint.path())) {
            return Err(ConfigError::RouteBinding(format!(
                "duplicate route binding {} {}",
                endpoint.method(),
                endpoint.path()
            )));
        }
    }
    Ok(())
}

/// Child router holding the resource routes.
pub fn resource_routes() -> Router<AppState> {
    let mut by_path: BTreeMap<&'static str, MethodRouter<AppState>> = BTreeMap::new();
    for endpoint in Endpoint::ALL {
        let method_router = match by_path.remove(endpoint.path()) {
            Some(existing) => existing.merge(endpoint.method_router()),
            None => endpoint.method_router(),
        };
        by_path.insert(endpoint.path(), method_router);
    }

    by_path
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        })
}

/// Build the full application: routes, fallback and middleware.
pub fn build_router(state: AppState, api_prefix: &str) -> App {
    let middleware = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    let router = Router::new()
        .merge(resource_routes())
        .nest(api_prefix, resource_routes())
        .route("/health", get(health::health))
        .fallback(handlers::route_not_found)
        .layer(middleware)
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_table_is_valid() {
        assert!(validate_bindings(&Endpoint::ALL).is_ok());
    }

    #[test]
    fn test_duplicate_binding_is_rejected() {
        let err = validate_bindings(&[Endpoint::GetUser, Endpoint::GetUser]).unwrap_err();
        assert!(matches!(err, ConfigError::RouteBinding(_)));
        assert!(err.to_string().contains("duplicate route binding GET /users/{id}"));
    }

    #[test]
    fn test_collection_paths_share_method_router() {
        let post_paths: Vec<_> = Endpoint::ALL
            .iter()
            .filter(|e| e.method() == Method::POST)
            .map(|e| e.path())
            .collect();
        assert_eq!(post_paths, vec!["/users", "/events"]);
    }
}
