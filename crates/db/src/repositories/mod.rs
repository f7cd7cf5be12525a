//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn RecordStore` as the first argument.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shipcheck_core::types::RecordId;

use crate::backend::BackendError;

pub mod checklist_response_repo;
pub mod checklist_template_repo;
pub mod media_evidence_repo;
pub mod survey_note_repo;
pub mod survey_repo;
pub mod utility_reading_repo;

pub use checklist_response_repo::ChecklistResponseRepo;
pub use checklist_template_repo::ChecklistTemplateRepo;
pub use media_evidence_repo::MediaEvidenceRepo;
pub use survey_note_repo::SurveyNoteRepo;
pub use survey_repo::SurveyRepo;
pub use utility_reading_repo::UtilityReadingRepo;

/// Serialize a DTO into the JSON object sent to the table API.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Value, BackendError> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn decode<T: DeserializeOwned>(row: Value) -> Result<T, BackendError> {
    Ok(serde_json::from_value(row)?)
}

pub(crate) fn decode_all<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BackendError> {
    rows.into_iter().map(decode).collect()
}

/// Read the backend-assigned `id` column of a freshly inserted row.
pub(crate) fn inserted_id(table: &str, row: &Value) -> Result<RecordId, BackendError> {
    row.get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .and_then(|s| RecordId::parse_str(s).ok())
        .ok_or_else(|| BackendError::MissingId {
            table: table.to_string(),
        })
}
