//! Per-table row schemas and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` entity struct matching the stored row
//! - A create DTO serialized for inserts (no backend-assigned columns)
//! - An update DTO where the table supports partial updates

pub mod checklist_response;
pub mod checklist_template;
pub mod media_evidence;
pub mod survey;
pub mod survey_note;
pub mod utility_reading;
