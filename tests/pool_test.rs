//! Behaviour of the API when the shared connection pool is exhausted or closed.

mod common;

use axum::http::StatusCode;
use common::{spawn_app, spawn_app_with, test_pool_options};
use find_a_walk::config::PoolOptions;
use serde_json::json;
use std::time::Duration;

fn single_connection_options() -> PoolOptions {
    PoolOptions {
        max_connections: 1,
        acquire_timeout: Duration::from_millis(250),
        ..test_pool_options()
    }
}

#[tokio::test]
async fn test_exhausted_pool_fails_with_503_then_recovers() {
    let app = spawn_app_with(single_connection_options()).await;

    let held = app.pool.acquire().await.unwrap();

    let response = tokio::time::timeout(Duration::from_secs(5), app.get("/users/anyone"))
        .await
        .expect("request should fail within the acquire timeout");
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "service_unavailable");

    let create = tokio::time::timeout(
        Duration::from_secs(5),
        app.post_json("/users", json!({"name": "Ada"})),
    )
    .await
    .unwrap();
    assert_eq!(create.status, StatusCode::SERVICE_UNAVAILABLE);

    drop(held);

    let response = app.get("/users/anyone").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.count_rows("users").await, 0);
}

#[tokio::test]
async fn test_unavailable_message_hides_driver_details() {
    let app = spawn_app_with(single_connection_options()).await;
    let _held = app.pool.acquire().await.unwrap();

    let response = app.get("/events/anything").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    let message = response.body["message"].as_str().unwrap();
    assert!(!message.to_lowercase().contains("sqlx"));
    assert!(!message.to_lowercase().contains("pool timed out"));
}

#[tokio::test]
async fn test_health_reflects_pool_state() {
    let app = spawn_app().await;

    let healthy = app.get("/health").await;
    assert_eq!(healthy.status, StatusCode::OK);
    assert_eq!(healthy.body["status"], "ok");
    assert_eq!(healthy.body["database"], "SQLite");

    app.pool.close().await;

    let unhealthy = app.get("/health").await;
    assert_eq!(unhealthy.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(unhealthy.body["status"], "unavailable");
}

#[tokio::test]
async fn test_requests_after_close_fail_fast() {
    let app = spawn_app().await;
    app.pool.close().await;

    let response = tokio::time::timeout(Duration::from_secs(1), app.get("/users/someone"))
        .await
        .expect("closed pool should not wait for the acquire timeout");
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
