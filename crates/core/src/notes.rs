//! Survey note validation.

use crate::error::CoreError;

/// Maximum length of note content in characters.
pub const MAX_NOTE_CONTENT_LENGTH: usize = 10_000;

/// Maximum length of a zone or section label.
pub const MAX_NOTE_LABEL_LENGTH: usize = 100;

/// Validate note content: must be non-empty and within the length limit.
pub fn validate_note_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Note content cannot be empty".to_string()));
    }
    if content.len() > MAX_NOTE_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Note content exceeds maximum length of {MAX_NOTE_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the zone (required) and optional section label.
pub fn validate_note_labels(zone: &str, section: Option<&str>) -> Result<(), CoreError> {
    if zone.trim().is_empty() {
        return Err(CoreError::Validation("Note zone cannot be empty".to_string()));
    }
    if zone.len() > MAX_NOTE_LABEL_LENGTH {
        return Err(label_too_long());
    }
    section.map_or(Ok(()), validate_note_section)
}

/// Validate a section label on its own.
pub fn validate_note_section(section: &str) -> Result<(), CoreError> {
    if section.len() > MAX_NOTE_LABEL_LENGTH {
        return Err(label_too_long());
    }
    Ok(())
}

fn label_too_long() -> CoreError {
    CoreError::Validation(format!(
        "Zone and section labels cannot exceed {MAX_NOTE_LABEL_LENGTH} characters"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_must_not_be_blank() {
        assert!(validate_note_content("Rust on frame 12").is_ok());
        assert!(validate_note_content("   ").is_err());
    }

    #[test]
    fn content_length_limit() {
        assert!(validate_note_content(&"a".repeat(MAX_NOTE_CONTENT_LENGTH)).is_ok());
        assert!(validate_note_content(&"a".repeat(MAX_NOTE_CONTENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn labels() {
        assert!(validate_note_labels("engine room", None).is_ok());
        assert!(validate_note_labels("engine room", Some("port side")).is_ok());
        assert!(validate_note_labels("", None).is_err());
        assert!(validate_note_labels("bridge", Some(&"s".repeat(101))).is_err());
        assert!(validate_note_section("aft").is_ok());
        assert!(validate_note_section(&"s".repeat(101)).is_err());
    }
}
