//! HTTP server for the REST API.
//!
//! Binds the listener, serves the router until SIGINT/SIGTERM, then closes
//! the connection pool.

use crate::db::DbPool;
use crate::error::ServerError;
use crate::state::AppState;
use crate::transport::router::build_router;
use axum::ServiceExt;
use axum::extract::Request;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Upper bound on draining in-flight requests after a shutdown signal.
const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a forced exit waits for stuck requests to hand back connections.
const FORCED_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct HttpServer {
    state: AppState,
    /// Host to bind to
    host: String,
    /// Port to bind to
    port: u16,
    /// Versioned prefix for the resource routes
    api_prefix: String,
}

impl HttpServer {
    /// Create a new HTTP server.
    ///
    /// # Arguments
    ///
    /// * `state` - Wired services and the shared pool
    /// * `host` - Host address to bind to
    /// * `port` - Port to bind to
    /// * `api_prefix` - Versioned prefix (e.g., "/api/v1")
    pub fn new(
        state: AppState,
        host: impl Into<String>,
        port: u16,
        api_prefix: impl Into<String>,
    ) -> Self {
        Self {
            state,
            host: host.into(),
            port,
            api_prefix: api_prefix.into(),
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serve until a shutdown signal arrives, then close the pool.
    pub async fn run(self) -> Result<(), ServerError> {
        let bind_addr = self.bind_addr();
        let pool = self.state.pool.clone();
        let app = build_router(self.state, &self.api_prefix);

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        info!(addr = %bind_addr, api_prefix = %self.api_prefix, "Starting server");

        let shutdown_notify = std::sync::Arc::new(tokio::sync::Notify::new());
        let shutdown_notify_clone = shutdown_notify.clone();
        let shutdown_signal = async move {
            wait_for_signal().await;
            shutdown_notify_clone.notify_one();
        };

        let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal);

        let (result, forced) = tokio::select! {
            result = server => (result.map_err(ServerError::Serve), false),
            _ = async {
                shutdown_notify.notified().await;
                info!(
                    timeout_secs = GRACEFUL_TIMEOUT.as_secs(),
                    "Waiting for in-flight requests (send signal again to force exit)..."
                );
                tokio::select! {
                    _ = tokio::time::sleep(GRACEFUL_TIMEOUT) => {
                        warn!("Graceful shutdown timeout, forcing exit");
                    }
                    _ = wait_for_signal() => {
                        warn!("Received second signal, forcing immediate exit");
                    }
                }
            } => (Ok(()), true),
        };

        close_pool(&pool, forced).await;
        result
    }
}

/// Close the pool after serving stops. Connection tasks left behind by a
/// forced exit may still hold connections, so that wait is bounded.
async fn close_pool(pool: &DbPool, forced: bool) {
    info!(forced, "Closing database connections");
    if forced {
        pool.close_within(FORCED_CLOSE_TIMEOUT).await;
    } else {
        pool.close().await;
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
