//! Checklist template model (read-only from this crate).

use serde::{Deserialize, Serialize};
use shipcheck_core::types::{RecordId, Timestamp};

/// One question inside a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateQuestion {
    pub id: String,
    pub category: String,
    pub text: String,
    pub is_mandatory: bool,
}

/// A row from the `checklist_templates` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub questions: Vec<TemplateQuestion>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl ChecklistTemplate {
    /// Questions that must be answered before a survey is complete.
    pub fn mandatory_questions(&self) -> impl Iterator<Item = &TemplateQuestion> {
        self.questions.iter().filter(|q| q.is_mandatory)
    }
}
