//! Media evidence naming and blob-path conventions.
//!
//! Stored objects follow:
//! `checklist/{survey_id}/{media_id}/{evidence_type}_{timestamp_ms}_{original_name}`

use crate::checklist::EvidenceType;
use crate::error::CoreError;
use crate::types::RecordId;

/// Top-level folder for checklist evidence in the media bucket.
pub const CHECKLIST_PREFIX: &str = "checklist";

/// Largest accepted attachment (25 MiB).
pub const MAX_MEDIA_BYTES: u64 = 25 * 1024 * 1024;

/// Fallback MIME type when the caller does not supply one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Derive the stored file name for an attachment.
///
/// Path separators in the original name are replaced with `_` so the name
/// cannot escape its folder.
///
/// # Examples
///
/// ```
/// use shipcheck_core::checklist::EvidenceType;
/// use shipcheck_core::media::media_file_name;
///
/// assert_eq!(
///     media_file_name(EvidenceType::Defect, 1700000000000, "hull.jpg"),
///     "defect_1700000000000_hull.jpg"
/// );
/// ```
pub fn media_file_name(evidence_type: EvidenceType, timestamp_ms: i64, original_name: &str) -> String {
    let safe_name = original_name.replace(['/', '\\'], "_");
    format!("{}_{timestamp_ms}_{safe_name}", evidence_type.as_str())
}

/// Build the object path for an attachment inside the media bucket.
pub fn media_storage_path(survey_id: RecordId, media_id: RecordId, file_name: &str) -> String {
    format!("{CHECKLIST_PREFIX}/{survey_id}/{media_id}/{file_name}")
}

/// Validate an attachment before upload: non-empty, bounded size, named.
pub fn validate_media_upload(original_name: &str, size: u64) -> Result<(), CoreError> {
    if original_name.trim().is_empty() {
        return Err(CoreError::Validation("File name cannot be empty".to_string()));
    }
    if size == 0 {
        return Err(CoreError::Validation("File is empty".to_string()));
    }
    if size > MAX_MEDIA_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds maximum size of {} MiB",
            MAX_MEDIA_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn file_name_combines_type_timestamp_and_name() {
        assert_eq!(
            media_file_name(EvidenceType::Compliance, 42, "deck plan.pdf"),
            "compliance_42_deck plan.pdf"
        );
    }

    #[test]
    fn file_name_strips_path_separators() {
        assert_eq!(
            media_file_name(EvidenceType::Reference, 1, "../etc/passwd"),
            "reference_1_.._etc_passwd"
        );
        assert_eq!(
            media_file_name(EvidenceType::Defect, 1, "a\\b.png"),
            "defect_1_a_b.png"
        );
    }

    #[test]
    fn storage_path_layout() {
        let survey = Uuid::nil();
        let media = Uuid::from_u128(1);
        assert_eq!(
            media_storage_path(survey, media, "defect_1_x.jpg"),
            format!("checklist/{survey}/{media}/defect_1_x.jpg")
        );
    }

    #[test]
    fn upload_validation() {
        assert!(validate_media_upload("a.jpg", 10).is_ok());
        assert!(validate_media_upload("", 10).is_err());
        assert!(validate_media_upload("a.jpg", 0).is_err());
        assert!(validate_media_upload("a.jpg", MAX_MEDIA_BYTES + 1).is_err());
        assert!(validate_media_upload("a.jpg", MAX_MEDIA_BYTES).is_ok());
    }
}
