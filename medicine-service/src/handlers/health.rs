use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::get_metrics;
use crate::startup::AppState;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

fn health_body(healthy: Result<(), String>) -> (StatusCode, Json<Value>) {
    match healthy {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": error
            })),
        ),
    }
}

/// Liveness plus a store ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    health_body(state.store.health_check().await.map_err(|e| e.to_string()))
}

/// Status only; load balancers ignore the body.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    health_body(state.store.health_check().await.map_err(|e| e.to_string())).0
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
