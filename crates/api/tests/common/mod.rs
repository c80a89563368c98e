#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use agenda_api::auth::device_lock::DeviceLock;
use agenda_api::config::ServerConfig;
use agenda_api::middleware::device_lock::DEVICE_PIN_HEADER;
use agenda_api::router::build_app_router;
use agenda_api::state::AppState;

/// PIN used by [`build_locked_test_app`].
pub const TEST_PIN: &str = "2468";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        device_pin: None,
        backfill_on_finalize: true,
    }
}

fn app_with(pool: SqlitePool, config: ServerConfig, device_lock: DeviceLock) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        device_lock: Arc::new(device_lock),
    };
    build_app_router(state, &config).unwrap()
}

/// Build the full application router, with the device lock open.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: SqlitePool) -> Router {
    app_with(pool, test_config(), DeviceLock::open())
}

/// Build the application with [`TEST_PIN`] guarding restore and reset.
pub fn build_locked_test_app(pool: SqlitePool) -> Router {
    let mut config = test_config();
    config.device_pin = Some(TEST_PIN.to_string());
    app_with(pool, config, DeviceLock::with_pin(TEST_PIN).unwrap())
}

/// Build the application with finalize preserving the booking by default.
pub fn build_preserving_test_app(pool: SqlitePool) -> Router {
    let mut config = test_config();
    config.backfill_on_finalize = false;
    app_with(pool, config, DeviceLock::open())
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST with an optional device PIN header.
pub async fn post_json_with_pin(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    pin: Option<&str>,
) -> Response<Body> {
    let mut request = json_request(Method::POST, uri, body);
    if let Some(pin) = pin {
        request
            .headers_mut()
            .insert(DEVICE_PIN_HEADER, pin.parse().unwrap());
    }
    send(app, request).await
}

/// Book an appointment and return its id.
pub async fn book(pool: &SqlitePool, client: &str, date: &str, time: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/appointments",
        serde_json::json!({
            "client_name": client,
            "client_phone": "(11) 99999-0000",
            "service_description": "Banho",
            "date": date,
            "time": time,
            "collaborator_id": null
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "booking {client} failed");
    body_json(response).await["data"]["appointment"]["id"]
        .as_i64()
        .unwrap()
}
