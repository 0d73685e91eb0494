//! find-a-walk - Main entry point.
//!
//! Opens the connection pool, wires repositories, services and handlers, and
//! serves the REST API until a shutdown signal arrives.

use clap::Parser;
use find_a_walk::config::Config;
use find_a_walk::db::DbPool;
use find_a_walk::state::AppState;
use find_a_walk::transport::{Endpoint, HttpServer, router};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Variables from .env must be in place before clap reads the environment
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();
    init_tracing(&config);

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    info!("Starting find-a-walk v{}", env!("CARGO_PKG_VERSION"));

    let pool_config = config.pool_config()?;
    let api_prefix = config.api_prefix()?.to_string();
    router::validate_bindings(&Endpoint::ALL)?;

    info!(database = %config.redacted_database_url(), "Connecting to database");
    let pool = match DbPool::connect(&pool_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Could not establish the connection pool");
            return Err(e.into());
        }
    };

    let state = AppState::from_pool(pool);
    let server = HttpServer::new(state, &config.host, config.port, api_prefix);

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
