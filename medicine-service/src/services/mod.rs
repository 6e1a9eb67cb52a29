pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoMedicineStore;
pub use memory::InMemoryMedicineStore;
pub use self::metrics::{get_metrics, init_metrics, record_store_operation};
pub use store::{MedicineStore, StoreError};
