//! Media evidence metadata model.

use serde::{Deserialize, Serialize};
use shipcheck_core::checklist::EvidenceType;
use shipcheck_core::types::{RecordId, Timestamp};

/// A row from the `media_evidence` table. The binary itself lives in the
/// media bucket at `storage_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEvidence {
    pub id: RecordId,
    pub response_id: RecordId,
    pub survey_id: RecordId,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_path: String,
    pub evidence_type: EvidenceType,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// DTO for inserting metadata. The id is generated client side so the blob
/// path can be derived before the row exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMediaEvidence {
    pub id: RecordId,
    pub response_id: RecordId,
    pub survey_id: RecordId,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_path: String,
    pub evidence_type: EvidenceType,
}
