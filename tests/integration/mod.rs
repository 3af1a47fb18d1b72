//! Integration tests for the public health services.
//!
//! Statistics tests run against `tests/fixtures/global_health_statistics.csv`.
//! Dashboard tests stand up a wiremock server in place of the City Health
//! Dashboard API, so no network access is needed.
//!
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

mod dashboard_service;
mod stats_service;

/// Send a GET through the router and collect status and body text.
pub(crate) async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send a GET and parse the body as JSON.
pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("body of {uri} is not JSON ({e}): {body}"));
    (status, json)
}
