//! Survey persistence façade.

use serde::Serialize;
use shipcheck_core::error::CoreError;
use shipcheck_core::types::RecordId;
use shipcheck_db::models::survey::{Survey, SurveyInput};
use shipcheck_db::repositories::SurveyRepo;

use crate::error::{ClientError, ClientResult};
use crate::state::AppState;

/// Outcome of [`SurveyService::save_survey`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveSurveyResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey: Option<Survey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveSurveyResult {
    fn saved(survey: Survey) -> Self {
        Self {
            success: true,
            survey: Some(survey),
            error: None,
        }
    }

    fn failed(error: &ClientError) -> Self {
        Self {
            success: false,
            survey: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct SurveyService {
    state: AppState,
}

impl SurveyService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Create or overwrite a survey and report the outcome as a value.
    ///
    /// The input is validated before anything is sent. On success the
    /// returned survey carries the saved id and `needs_sync == false`.
    pub async fn save_survey(
        &self,
        input: SurveyInput,
        existing_id: Option<RecordId>,
    ) -> SaveSurveyResult {
        match self.try_save(&input, existing_id).await {
            Ok(id) => SaveSurveyResult::saved(Survey::from_saved(id, input)),
            Err(e) => {
                tracing::warn!(survey_id = ?existing_id, error = %e, "Survey save failed");
                SaveSurveyResult::failed(&e)
            }
        }
    }

    async fn try_save(
        &self,
        input: &SurveyInput,
        existing_id: Option<RecordId>,
    ) -> ClientResult<RecordId> {
        input.check()?;
        let id = SurveyRepo::save(self.state.records.as_ref(), input, existing_id).await?;
        Ok(id)
    }

    pub async fn get_survey(&self, id: RecordId) -> ClientResult<Survey> {
        SurveyRepo::find_by_id(self.state.records.as_ref(), id)
            .await?
            .ok_or_else(|| {
                ClientError::Core(CoreError::NotFound {
                    entity: "Survey",
                    id: id.to_string(),
                })
            })
    }

    /// All surveys, most recently updated first.
    pub async fn list_surveys(&self) -> ClientResult<Vec<Survey>> {
        Ok(SurveyRepo::list(self.state.records.as_ref()).await?)
    }

    pub async fn list_surveys_for_user(&self, user_id: RecordId) -> ClientResult<Vec<Survey>> {
        Ok(SurveyRepo::list_by_user(self.state.records.as_ref(), user_id).await?)
    }

    /// Delete a survey. Refused while offline, before any backend call.
    pub async fn delete_survey(&self, id: RecordId) -> ClientResult<bool> {
        self.state.connectivity.ensure_online("delete surveys")?;
        let deleted = SurveyRepo::delete(self.state.records.as_ref(), id).await?;
        if deleted {
            tracing::info!(survey_id = %id, "Survey deleted");
        }
        Ok(deleted)
    }
}
