use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Client as MongoClient, Collection,
};
use serde_json::Value;
use service_core::error::AppError;

use super::store::{MedicineStore, StoreError};
use crate::models::{MedicineFields, MedicineId, MedicineRecord};

#[derive(Clone)]
pub struct MongoMedicineStore {
    client: MongoClient,
    medicines: Collection<Document>,
}

impl MongoMedicineStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let medicines = client.database(database).collection(collection);
        tracing::info!(
            database = %database,
            collection = %collection,
            "Successfully connected to MongoDB database"
        );
        Ok(Self { client, medicines })
    }
}

#[async_trait]
impl MedicineStore for MongoMedicineStore {
    async fn list_all(&self) -> Result<Vec<MedicineRecord>, StoreError> {
        let cursor = self.medicines.find(doc! {}, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents.into_iter().map(document_to_record).collect()
    }

    async fn insert_one(&self, fields: MedicineFields) -> Result<MedicineId, StoreError> {
        let document = mongodb::bson::to_document(&fields)?;
        let result = self.medicines.insert_one(document, None).await?;

        result
            .inserted_id
            .as_object_id()
            .map(MedicineId::from)
            .ok_or_else(|| {
                StoreError::Corrupt(format!("inserted _id is not an ObjectId: {}", result.inserted_id))
            })
    }

    async fn update_one_by_id(
        &self,
        id: &MedicineId,
        fields: MedicineFields,
    ) -> Result<bool, StoreError> {
        let set = mongodb::bson::to_document(&fields)?;
        let result = self
            .medicines
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": set }, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_one_by_id(&self, id: &MedicineId) -> Result<bool, StoreError> {
        let result = self
            .medicines
            .delete_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }

    async fn close(&self) {
        tracing::info!("Closing MongoDB connections");
        self.client.clone().shutdown().await;
    }
}

fn document_to_record(mut document: Document) -> Result<MedicineRecord, StoreError> {
    // Documents written by other tools may use any _id type; keep them visible.
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => MedicineId::from(oid).into(),
        Some(other) => other.into_relaxed_extjson(),
        None => Value::Null,
    };

    // Relaxed extended JSON keeps plain numbers and strings as they were sent.
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(MedicineRecord { id, fields }),
        other => Err(StoreError::Corrupt(format!(
            "document did not convert to an object: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn document_converts_to_record_with_hex_id() {
        let oid = ObjectId::new();
        let record = document_to_record(doc! {
            "_id": oid,
            "name": "Aspirin",
            "quantity": 10_i32,
            "price": 2.5,
        })
        .unwrap();

        assert_eq!(record.id, Value::String(oid.to_hex()));
        assert_eq!(record.fields["name"], "Aspirin");
        assert_eq!(record.fields["quantity"], 10);
        assert_eq!(record.fields["price"], 2.5);
        assert!(!record.fields.contains_key("_id"));
    }

    #[test]
    fn foreign_ids_are_rendered_as_they_are_stored() {
        let record = document_to_record(doc! { "_id": "legacy-key", "name": "X" }).unwrap();
        assert_eq!(record.id, Value::String("legacy-key".to_string()));
        assert_eq!(record.fields["name"], "X");

        let record = document_to_record(doc! { "_id": 42_i32, "name": "Y" }).unwrap();
        assert_eq!(record.id, serde_json::json!(42));
    }

    #[test]
    fn document_without_id_still_lists() {
        let record = document_to_record(doc! { "name": "X", "quantity": 1_i32 }).unwrap();
        assert_eq!(record.id, Value::Null);
        assert_eq!(record.fields["quantity"], 1);
    }
}
