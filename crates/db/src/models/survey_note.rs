//! Survey note model.

use serde::{Deserialize, Serialize};
use shipcheck_core::types::{RecordId, Timestamp};

/// A row from the `survey_notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyNote {
    pub id: RecordId,
    pub survey_id: RecordId,
    pub zone: String,
    #[serde(default)]
    pub section: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a new note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSurveyNote {
    pub survey_id: RecordId,
    pub zone: String,
    pub section: Option<String>,
    pub content: String,
}

/// DTO for updating a note. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSurveyNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateSurveyNote {
    pub fn is_empty(&self) -> bool {
        self.zone.is_none() && self.section.is_none() && self.content.is_none()
    }
}
