//! Survey lifecycle status and field limits.
//!
//! Status transitions are unconstrained: any status may follow any other.
//! The helpers here only cover parsing and form-level limits.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the ship name.
pub const MAX_SHIP_NAME_LENGTH: u64 = 200;

/// Maximum length of the client name.
pub const MAX_CLIENT_NAME_LENGTH: u64 = 200;

/// Maximum length of the free-form project scope text.
pub const MAX_PROJECT_SCOPE_LENGTH: u64 = 10_000;

/// Maximum number of tools attached to one survey.
pub const MAX_TOOLS: usize = 100;

/// Maximum length of a custom field key.
pub const MAX_CUSTOM_FIELD_KEY_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status strings, in display order.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Survey lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurveyStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

impl SurveyStatus {
    /// The string stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Strict parse, used for user input.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Lenient parse for backend rows: absent or unknown values become `Draft`.
    pub fn from_column(value: Option<&str>) -> Self {
        value.and_then(|v| Self::parse(v).ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate the tool list: bounded length, no blank names.
pub fn validate_tools(tools: &[String]) -> Result<(), CoreError> {
    if tools.len() > MAX_TOOLS {
        return Err(CoreError::Validation(format!(
            "A survey may list at most {MAX_TOOLS} tools"
        )));
    }
    if tools.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation("Tool names cannot be blank".to_string()));
    }
    Ok(())
}

/// Validate custom field keys: non-blank and bounded.
pub fn validate_custom_field_key(key: &str) -> Result<(), CoreError> {
    if key.trim().is_empty() {
        return Err(CoreError::Validation(
            "Custom field names cannot be blank".to_string(),
        ));
    }
    if key.len() > MAX_CUSTOM_FIELD_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Custom field name exceeds maximum length of {MAX_CUSTOM_FIELD_KEY_LENGTH} characters"
        )));
    }
    Ok(())
}
