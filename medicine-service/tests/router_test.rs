//! Route table checks that need no socket.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use medicine_service::services::InMemoryMedicineStore;
use medicine_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> axum::Router {
    build_router(AppState {
        config: common::test_config(),
        store: Arc::new(InMemoryMedicineStore::new()),
    })
    .expect("router should build")
}

async fn call(method: &str, uri: &str) -> (StatusCode, Value) {
    let response = router()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let (status, body) = call("GET", "/medicines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn every_unlisted_method_and_path_is_404() {
    for (method, uri) in [
        ("PATCH", "/medicines"),
        ("DELETE", "/medicines"),
        ("PUT", "/add-medicine"),
        ("POST", "/delete-medicine"),
        ("GET", "/medicines/123"),
        ("GET", "/"),
    ] {
        let (status, body) = call(method, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(
            body["message"],
            format!("Route not found: {} {}", method, uri)
        );
    }
}

#[tokio::test]
async fn post_with_empty_body_is_bad_request() {
    let (status, body) = call("POST", "/add-medicine").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
}

#[test]
fn invalid_cors_origin_is_a_config_error() {
    let mut config = common::test_config();
    config.cors.allowed_origin = "bad\norigin".to_string();

    let result = build_router(AppState {
        config,
        store: Arc::new(InMemoryMedicineStore::new()),
    });

    assert!(result.is_err());
}
