use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use super::payload::JsonPayload;
use crate::models::{medicine::parse_delete_id, MedicineRecord, MedicineUpdate, NewMedicine};
use crate::services::{record_store_operation, StoreError};
use crate::startup::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteMedicineQuery {
    pub id: Option<String>,
}

/// Count the failed call and give it the message callers see.
fn store_failure(
    operation: &'static str,
    context: &'static str,
) -> impl Fn(StoreError) -> AppError {
    move |err| {
        record_store_operation(operation, "error");
        AppError::from(err).with_context(context)
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_medicines(
    State(state): State<AppState>,
) -> Result<Json<Vec<MedicineRecord>>, AppError> {
    let medicines = state
        .store
        .list_all()
        .await
        .map_err(store_failure("list", "Error fetching medicines"))?;
    record_store_operation("list", "ok");

    tracing::debug!(count = medicines.len(), "Fetched medicines");
    Ok(Json(medicines))
}

#[tracing::instrument(skip(state, payload))]
pub async fn add_medicine(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let medicine = NewMedicine::from_payload(payload)?;

    let medicine_id = state
        .store
        .insert_one(medicine.into_fields())
        .await
        .map_err(store_failure("insert", "Error adding medicine"))?;
    record_store_operation("insert", "ok");

    tracing::info!(medicine_id = %medicine_id, "Medicine added");
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Medicine added successfully"),
    ))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_medicine(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<MessageResponse>, AppError> {
    let update = MedicineUpdate::from_payload(payload)?;

    let matched = state
        .store
        .update_one_by_id(&update.id, update.fields)
        .await
        .map_err(store_failure("update", "Error updating medicine"))?;
    record_store_operation("update", "ok");

    if matched {
        tracing::info!(medicine_id = %update.id, "Medicine updated");
    } else {
        tracing::warn!(medicine_id = %update.id, "Update matched no medicine");
    }
    Ok(MessageResponse::new("Medicine updated successfully"))
}

#[tracing::instrument(skip(state))]
pub async fn delete_medicine(
    State(state): State<AppState>,
    query: Result<Query<DeleteMedicineQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Query(query) = query
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e)))?;
    let medicine_id = parse_delete_id(query.id.as_deref())?;

    let deleted = state
        .store
        .delete_one_by_id(&medicine_id)
        .await
        .map_err(store_failure("delete", "Error deleting medicine"))?;
    record_store_operation("delete", "ok");

    if deleted {
        tracing::info!(medicine_id = %medicine_id, "Medicine deleted");
    } else {
        tracing::warn!(medicine_id = %medicine_id, "Delete matched no medicine");
    }
    Ok(MessageResponse::new("Medicine deleted successfully"))
}
