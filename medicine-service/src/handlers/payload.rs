use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::Value;
use service_core::error::AppError;

use crate::models::MedicineFields;
use crate::startup::AppState;

/// Whole request body parsed once as a JSON object.
///
/// Unlike `axum::Json` this does not insist on a `Content-Type` header, and
/// every failure is reported through `AppError` so callers always get a
/// `{"message"}` body.
#[derive(Debug)]
pub struct JsonPayload(pub MedicineFields);

#[async_trait]
impl FromRequest<AppState> for JsonPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(state.config.http.max_body_bytes as u64)
            } else {
                AppError::BadRequest(anyhow::anyhow!(
                    "Failed to read request body: {}",
                    rejection.body_text()
                ))
            }
        })?;

        parse_object(&bytes).map(JsonPayload)
    }
}

fn parse_object(bytes: &[u8]) -> Result<MedicineFields, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid JSON body: expected an object"
        ))),
        Err(e) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid JSON body: {}",
            e
        ))),
    }
}
