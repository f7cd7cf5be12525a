//! Checklist response values, evidence types, and answer validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the free-text notes attached to an answer.
pub const MAX_RESPONSE_NOTES_LENGTH: usize = 5_000;

/// Maximum length of a zone / asset / QR / RFID tag.
pub const MAX_TAG_LENGTH: usize = 128;

// ---------------------------------------------------------------------------
// Response value
// ---------------------------------------------------------------------------

/// The answer recorded for one checklist question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseValue {
    Yes,
    No,
    #[serde(rename = "na")]
    NotApplicable,
    #[default]
    Skipped,
}

impl ResponseValue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::NotApplicable => "na",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the question has been answered with something other than `skipped`.
    pub fn is_answered(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

// ---------------------------------------------------------------------------
// Evidence type
// ---------------------------------------------------------------------------

pub const EVIDENCE_DEFECT: &str = "defect";
pub const EVIDENCE_COMPLIANCE: &str = "compliance";
pub const EVIDENCE_REFERENCE: &str = "reference";

/// All valid evidence type strings.
pub const VALID_EVIDENCE_TYPES: &[&str] = &[EVIDENCE_DEFECT, EVIDENCE_COMPLIANCE, EVIDENCE_REFERENCE];

/// What a media attachment is meant to demonstrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    Defect,
    Compliance,
    Reference,
}

impl EvidenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Defect => EVIDENCE_DEFECT,
            Self::Compliance => EVIDENCE_COMPLIANCE,
            Self::Reference => EVIDENCE_REFERENCE,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            EVIDENCE_DEFECT => Ok(Self::Defect),
            EVIDENCE_COMPLIANCE => Ok(Self::Compliance),
            EVIDENCE_REFERENCE => Ok(Self::Reference),
            other => Err(CoreError::Validation(format!(
                "Invalid evidence type '{other}'. Must be one of: {}",
                VALID_EVIDENCE_TYPES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate one answer before it is submitted.
///
/// A mandatory question cannot be left `skipped`; notes and tags are bounded.
pub fn validate_response(
    question_id: &str,
    is_mandatory: bool,
    value: ResponseValue,
    notes: Option<&str>,
    tags: &[Option<&str>],
) -> Result<(), CoreError> {
    if question_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Question identifier cannot be empty".to_string(),
        ));
    }
    if is_mandatory && !value.is_answered() {
        return Err(CoreError::Validation(format!(
            "Question '{question_id}' is mandatory and cannot be skipped"
        )));
    }
    if notes.is_some_and(|n| n.len() > MAX_RESPONSE_NOTES_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Response notes exceed maximum length of {MAX_RESPONSE_NOTES_LENGTH} characters"
        )));
    }
    if tags.iter().flatten().any(|t| t.len() > MAX_TAG_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Tags cannot exceed {MAX_TAG_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_value_wire_names() {
        assert_eq!(
            serde_json::to_string(&ResponseValue::NotApplicable).unwrap(),
            "\"na\""
        );
        let v: ResponseValue = serde_json::from_str("\"skipped\"").unwrap();
        assert_eq!(v, ResponseValue::Skipped);
        let v: ResponseValue = serde_json::from_str("\"yes\"").unwrap();
        assert_eq!(v.as_str(), "yes");
    }

    #[test]
    fn evidence_type_parse() {
        assert_eq!(EvidenceType::parse("defect").unwrap(), EvidenceType::Defect);
        assert!(EvidenceType::parse("photo").is_err());
    }

    #[test]
    fn mandatory_question_cannot_be_skipped() {
        let err = validate_response("q1", true, ResponseValue::Skipped, None, &[]).unwrap_err();
        assert!(err.to_string().contains("mandatory"));
        assert!(validate_response("q1", false, ResponseValue::Skipped, None, &[]).is_ok());
        assert!(validate_response("q1", true, ResponseValue::NotApplicable, None, &[]).is_ok());
    }

    #[test]
    fn empty_question_id_rejected() {
        assert!(validate_response(" ", false, ResponseValue::Yes, None, &[]).is_err());
    }

    #[test]
    fn oversized_notes_and_tags_rejected() {
        let long = "x".repeat(MAX_RESPONSE_NOTES_LENGTH + 1);
        assert!(validate_response("q1", false, ResponseValue::No, Some(&long), &[]).is_err());
        let tag = "t".repeat(MAX_TAG_LENGTH + 1);
        assert!(
            validate_response("q1", false, ResponseValue::No, None, &[None, Some(&tag)]).is_err()
        );
    }
}
