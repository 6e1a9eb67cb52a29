use async_trait::async_trait;
use mongodb::error::ErrorKind;
use service_core::error::AppError;
use thiserror::Error;

use crate::models::{MedicineFields, MedicineId, MedicineRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(mongodb::error::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Unexpected document shape: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        // No server reachable within the selection timeout.
        match *err.kind {
            ErrorKind::ServerSelection { .. } => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Mongo(err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// The medicine collection.
///
/// Updates merge: only the supplied fields are overwritten. Update and delete
/// report whether a record matched, but a miss is not an error.
#[async_trait]
pub trait MedicineStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<MedicineRecord>, StoreError>;

    async fn insert_one(&self, fields: MedicineFields) -> Result<MedicineId, StoreError>;

    async fn update_one_by_id(
        &self,
        id: &MedicineId,
        fields: MedicineFields,
    ) -> Result<bool, StoreError>;

    async fn delete_one_by_id(&self, id: &MedicineId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release connections. Called once after the server stops.
    async fn close(&self) {}
}
