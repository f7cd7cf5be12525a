//! Checklist response model.

use serde::{Deserialize, Serialize};
use shipcheck_core::checklist::{validate_response, ResponseValue};
use shipcheck_core::error::CoreError;
use shipcheck_core::types::{RecordId, Timestamp};

/// A row from the `checklist_responses` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub id: RecordId,
    pub survey_id: RecordId,
    pub question_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub response: ResponseValue,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub rfid_tag: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// DTO for writing a checklist answer. Used for both insert and full
/// overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChecklistResponse {
    pub survey_id: RecordId,
    pub question_id: String,
    pub category: String,
    pub question_text: String,
    pub response: ResponseValue,
    pub is_mandatory: bool,
    pub notes: Option<String>,
    pub zone: Option<String>,
    pub asset_tag: Option<String>,
    pub qr_code: Option<String>,
    pub rfid_tag: Option<String>,
}

impl CreateChecklistResponse {
    pub fn check(&self) -> Result<(), CoreError> {
        validate_response(
            &self.question_id,
            self.is_mandatory,
            self.response,
            self.notes.as_deref(),
            &[
                self.zone.as_deref(),
                self.asset_tag.as_deref(),
                self.qr_code.as_deref(),
                self.rfid_tag.as_deref(),
            ],
        )
    }
}
