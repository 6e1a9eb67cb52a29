use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{MedicineStore, StoreError};
use crate::models::{MedicineFields, MedicineId, MedicineRecord};

/// Process-local store, kept in insertion order. Backs `MEDICINE_STORE=memory`
/// and the integration tests.
#[derive(Default)]
pub struct InMemoryMedicineStore {
    records: RwLock<Vec<(MedicineId, MedicineFields)>>,
}

impl InMemoryMedicineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MedicineStore for InMemoryMedicineStore {
    async fn list_all(&self) -> Result<Vec<MedicineRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(id, fields)| MedicineRecord {
                id: (*id).into(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn insert_one(&self, fields: MedicineFields) -> Result<MedicineId, StoreError> {
        let id = MedicineId::generate();
        self.records.write().await.push((id, fields));
        Ok(id)
    }

    async fn update_one_by_id(
        &self,
        id: &MedicineId,
        fields: MedicineFields,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|(stored, _)| stored == id) {
            Some((_, stored)) => {
                for (key, value) in fields {
                    stored.insert(key, value);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one_by_id(&self, id: &MedicineId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(stored, _)| stored != id);
        Ok(records.len() != before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
