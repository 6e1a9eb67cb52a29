//! HTTP handlers and the route table for medicine-service.

pub mod health;
pub mod medicines;
pub mod payload;

use axum::{
    http::{Method, Uri},
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;

use crate::startup::AppState;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use medicines::{add_medicine, delete_medicine, list_medicines, update_medicine};
pub use payload::JsonPayload;

/// Every (method, path) the service answers. Known paths hit with another
/// method get the same 404 as unknown paths.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/medicines", get(list_medicines).fallback(not_found))
        .route("/add-medicine", post(add_medicine).fallback(not_found))
        .route("/update-medicine", put(update_medicine).fallback(not_found))
        .route("/delete-medicine", delete(delete_medicine).fallback(not_found))
        .route("/health", get(health_check).fallback(not_found))
        .route("/ready", get(readiness_check).fallback(not_found))
        .route("/metrics", get(metrics_endpoint).fallback(not_found))
        .fallback(not_found)
}

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    AppError::NotFound(anyhow::anyhow!(
        "Route not found: {} {}",
        method,
        uri.path()
    ))
}
