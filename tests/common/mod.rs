//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use find_a_walk::config::PoolOptions;
use find_a_walk::db::{DbPool, PoolConfig};
use find_a_walk::state::AppState;
use find_a_walk::transport::{App, build_router};
use std::time::Duration;
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const API_PREFIX: &str = "/api/v1";

/// SQLite flavour of `schema.sql`.
pub const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id    TEXT PRIMARY KEY NOT NULL,
    name  TEXT NOT NULL CHECK (length(name) > 0),
    email TEXT UNIQUE
);

CREATE TABLE IF NOT EXISTS events (
    id          TEXT PRIMARY KEY NOT NULL,
    title       TEXT NOT NULL CHECK (length(title) > 0),
    description TEXT,
    location    TEXT,
    starts_at   TEXT,
    ends_at     TEXT,
    CONSTRAINT events_time_order CHECK (ends_at IS NULL OR starts_at IS NULL OR ends_at >= starts_at)
);
"#;

pub struct TestApp {
    pub app: App,
    pub pool: DbPool,
    // Deleted when the fixture is dropped
    _db_file: NamedTempFile,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub fn test_pool_options() -> PoolOptions {
    PoolOptions {
        max_connections: 5,
        min_connections: 0,
        acquire_timeout: Duration::from_secs(5),
        ..PoolOptions::default()
    }
}

/// Open a pool on a fresh SQLite file. The schema is only created when asked.
pub async fn open_pool(options: PoolOptions, with_schema: bool) -> (DbPool, NamedTempFile) {
    let db_file = NamedTempFile::new().unwrap();
    let url = format!("sqlite:{}", db_file.path().display());
    let config = PoolConfig::new(url, options).unwrap();
    let pool = DbPool::connect(&config).await.unwrap();

    if with_schema {
        let DbPool::SQLite(sqlite) = &pool else {
            panic!("expected SQLite pool");
        };
        sqlx::raw_sql(SQLITE_SCHEMA).execute(sqlite).await.unwrap();
    }
    (pool, db_file)
}

pub async fn spawn_app_with(options: PoolOptions) -> TestApp {
    let (pool, db_file) = open_pool(options, true).await;
    let app = build_router(AppState::from_pool(pool.clone()), API_PREFIX);
    TestApp {
        app,
        pool,
        _db_file: db_file,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_pool_options()).await
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, body.to_string()))
            .await
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        let DbPool::SQLite(sqlite) = &self.pool else {
            panic!("expected SQLite pool");
        };
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(sqlite)
            .await
            .unwrap()
    }
}

pub fn json_request(method: Method, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub fn content_type(response: &TestResponse) -> &str {
    response
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
