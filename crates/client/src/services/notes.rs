use shipcheck_core::error::CoreError;
use shipcheck_core::notes::{validate_note_content, validate_note_labels, validate_note_section};
use shipcheck_core::types::RecordId;
use shipcheck_db::models::survey_note::{CreateSurveyNote, SurveyNote, UpdateSurveyNote};
use shipcheck_db::repositories::SurveyNoteRepo;

use crate::error::{ClientError, ClientResult};
use crate::state::AppState;

/// Free-form notes attached to a survey zone.
#[derive(Clone)]
pub struct NoteService {
    state: AppState,
}

impl NoteService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn create_note(&self, input: CreateSurveyNote) -> ClientResult<SurveyNote> {
        validate_note_content(&input.content)?;
        validate_note_labels(&input.zone, input.section.as_deref())?;
        let note = SurveyNoteRepo::create(self.state.records.as_ref(), &input).await?;
        tracing::debug!(note_id = %note.id, survey_id = %note.survey_id, "Note created");
        Ok(note)
    }

    /// Notes of a survey in creation order.
    pub async fn list_notes(&self, survey_id: RecordId) -> ClientResult<Vec<SurveyNote>> {
        Ok(SurveyNoteRepo::list_by_survey(self.state.records.as_ref(), survey_id).await?)
    }

    pub async fn list_zone_notes(
        &self,
        survey_id: RecordId,
        zone: &str,
    ) -> ClientResult<Vec<SurveyNote>> {
        Ok(SurveyNoteRepo::list_by_zone(self.state.records.as_ref(), survey_id, zone).await?)
    }

    pub async fn update_note(
        &self,
        id: RecordId,
        input: UpdateSurveyNote,
    ) -> ClientResult<SurveyNote> {
        if input.is_empty() {
            return Err(CoreError::Validation("Nothing to update".to_string()).into());
        }
        if let Some(content) = &input.content {
            validate_note_content(content)?;
        }
        match (&input.zone, &input.section) {
            (Some(zone), section) => validate_note_labels(zone, section.as_deref())?,
            (None, Some(section)) => validate_note_section(section)?,
            (None, None) => {}
        }

        SurveyNoteRepo::update(self.state.records.as_ref(), id, &input)
            .await?
            .ok_or_else(|| {
                ClientError::Core(CoreError::NotFound {
                    entity: "Survey note",
                    id: id.to_string(),
                })
            })
    }

    pub async fn delete_note(&self, id: RecordId) -> ClientResult<bool> {
        Ok(SurveyNoteRepo::delete(self.state.records.as_ref(), id).await?)
    }
}
