// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use fitbridge_tracker::config::Config;
use fitbridge_tracker::routes::create_router;
use fitbridge_tracker::services::ActivityLedger;
use fitbridge_tracker::store::ActivityStore;
use fitbridge_tracker::AppState;
use std::sync::Arc;

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app with a custom config (and its own in-memory store).
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(ActivityStore::open_memory());
    let ledger = ActivityLedger::new(store.clone());

    let state = Arc::new(AppState {
        config,
        store,
        ledger,
    });

    (create_router(state.clone()), state)
}

/// Create a test app over a disk store rooted at `data_dir`.
#[allow(dead_code)]
pub fn create_test_app_on_disk(data_dir: &std::path::Path) -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(ActivityStore::open_disk(data_dir).expect("Failed to open test data dir"));
    let ledger = ActivityLedger::new(store.clone());

    let state = Arc::new(AppState {
        config: Config::test_default(),
        store,
        ledger,
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT the way the auth routes do.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    fitbridge_tracker::middleware::auth::create_session_jwt(user_id, signing_key)
        .expect("Failed to create JWT")
}

/// Build an authenticated request with an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
