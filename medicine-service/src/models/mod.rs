pub mod medicine;

pub use medicine::{MedicineFields, MedicineId, MedicineRecord, MedicineUpdate, NewMedicine};
