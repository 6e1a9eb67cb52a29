//! Medicine records and the validation applied to incoming payloads.
//!
//! Only `name` and `quantity` are checked. Every other field is stored as
//! sent, so the schema stays open for whatever the front end records.

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Arbitrary JSON fields of a medicine, excluding its id.
pub type MedicineFields = Map<String, Value>;

pub const CREATE_REQUIRED_MESSAGE: &str = "Invalid data: name and quantity are required";
pub const UPDATE_REQUIRED_MESSAGE: &str = "Invalid data: ID, name, and quantity are required";
pub const DELETE_REQUIRED_MESSAGE: &str = "Invalid data: ID is required";

/// Store-assigned identifier. Rendered as a 24 character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MedicineId(ObjectId);

impl MedicineId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for MedicineId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for MedicineId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|_| {
            AppError::BadRequest(anyhow::anyhow!("Invalid data: malformed ID '{}'", s))
        })
    }
}

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for MedicineId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl From<MedicineId> for Value {
    fn from(id: MedicineId) -> Self {
        Value::String(id.to_string())
    }
}

/// A stored medicine as returned by `GET /medicines`.
///
/// `id` is opaque: ids this service assigns render as hex strings, but
/// records written by other tools keep whatever `_id` they were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineRecord {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(flatten)]
    pub fields: MedicineFields,
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    fields: MedicineFields,
}

impl NewMedicine {
    pub fn from_payload(mut payload: MedicineFields) -> Result<Self, AppError> {
        if !has_name(&payload) || !has_quantity(&payload) {
            return Err(AppError::BadRequest(anyhow::anyhow!(CREATE_REQUIRED_MESSAGE)));
        }
        ensure_storable(&payload)?;

        // The store assigns ids; a caller-chosen `_id` is never honored.
        payload.remove("_id");

        Ok(Self { fields: payload })
    }

    pub fn into_fields(self) -> MedicineFields {
        self.fields
    }
}

/// A validated partial update: `fields` are merged into the stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineUpdate {
    pub id: MedicineId,
    pub fields: MedicineFields,
}

impl MedicineUpdate {
    /// Accepts the id under either `id` or `_id`; `id` wins when both are sent.
    pub fn from_payload(mut payload: MedicineFields) -> Result<Self, AppError> {
        let id = payload.remove("id");
        let legacy_id = payload.remove("_id");
        let id = id.or(legacy_id).filter(|v| !is_blank(v));

        let id = match id {
            Some(id) if has_name(&payload) && has_quantity(&payload) => id,
            _ => return Err(AppError::BadRequest(anyhow::anyhow!(UPDATE_REQUIRED_MESSAGE))),
        };

        let id: MedicineId = match &id {
            Value::String(s) => s.parse()?,
            other => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Invalid data: malformed ID '{}'",
                    other
                )))
            }
        };

        ensure_storable(&payload)?;

        Ok(Self {
            id,
            fields: payload,
        })
    }
}

/// Parses the `id` query parameter of a delete request.
pub fn parse_delete_id(id: Option<&str>) -> Result<MedicineId, AppError> {
    match id {
        Some(id) if !id.is_empty() => id.parse(),
        _ => Err(AppError::BadRequest(anyhow::anyhow!(DELETE_REQUIRED_MESSAGE))),
    }
}

fn has_name(payload: &MedicineFields) -> bool {
    matches!(payload.get("name"), Some(Value::String(name)) if !name.is_empty())
}

// Presence only: 0, "" and false are all valid quantities.
fn has_quantity(payload: &MedicineFields) -> bool {
    matches!(payload.get("quantity"), Some(q) if !q.is_null())
}

/// The store keeps integers as signed 64-bit; larger ones cannot be written.
fn ensure_storable(payload: &MedicineFields) -> Result<(), AppError> {
    match payload.iter().find(|(_, value)| !fits_store(value)) {
        Some((key, _)) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid data: number out of range in field '{}'",
            key
        ))),
        None => Ok(()),
    }
}

fn fits_store(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_f64(),
        Value::Array(items) => items.iter().all(fits_store),
        Value::Object(map) => map.values().all(fits_store),
        _ => true,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
