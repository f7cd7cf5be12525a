//! Application services.
//!
//! Each service is a cheap-to-clone handle over [`AppState`](crate::AppState).
//! Only [`SurveyService::save_survey`] converts failures into values; every
//! other operation returns [`ClientResult`](crate::ClientResult).

pub mod checklist;
pub mod media;
pub mod notes;
pub mod survey;
pub mod utility;

pub use checklist::{checklist_progress, ChecklistProgress, ChecklistService};
pub use media::{MediaEvidenceService, MediaUpload};
pub use notes::NoteService;
pub use survey::{SaveSurveyResult, SurveyService};
pub use utility::{UtilityDashboard, UtilityService};
