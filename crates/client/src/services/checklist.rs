use serde::Serialize;
use shipcheck_core::error::CoreError;
use shipcheck_core::types::RecordId;
use shipcheck_db::models::checklist_response::{ChecklistResponse, CreateChecklistResponse};
use shipcheck_db::models::checklist_template::ChecklistTemplate;
use shipcheck_db::repositories::{ChecklistResponseRepo, ChecklistTemplateRepo};

use crate::error::{ClientError, ClientResult};
use crate::state::AppState;

/// How far a survey's answers cover a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub answered: usize,
    pub total: usize,
    /// Ids of mandatory questions without an answer, in template order.
    pub missing_mandatory: Vec<String>,
}

impl ChecklistProgress {
    pub fn is_complete(&self) -> bool {
        self.missing_mandatory.is_empty()
    }
}

/// Compare a template against the recorded answers.
pub fn checklist_progress(
    template: &ChecklistTemplate,
    responses: &[ChecklistResponse],
) -> ChecklistProgress {
    let answered_ids = |id: &str| {
        responses
            .iter()
            .any(|r| r.question_id == id && r.response.is_answered())
    };

    ChecklistProgress {
        answered: template
            .questions
            .iter()
            .filter(|q| answered_ids(&q.id))
            .count(),
        total: template.questions.len(),
        missing_mandatory: template
            .mandatory_questions()
            .filter(|q| !answered_ids(&q.id))
            .map(|q| q.id.clone())
            .collect(),
    }
}

#[derive(Clone)]
pub struct ChecklistService {
    state: AppState,
}

impl ChecklistService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Record an answer. A question already answered in the same survey is
    /// overwritten rather than duplicated.
    pub async fn save_response(&self, input: CreateChecklistResponse) -> ClientResult<RecordId> {
        input.check()?;
        let store = self.state.records.as_ref();

        let existing =
            ChecklistResponseRepo::find_for_question(store, input.survey_id, &input.question_id)
                .await?;
        let id = ChecklistResponseRepo::save(store, &input, existing.map(|r| r.id)).await?;

        tracing::debug!(
            response_id = %id,
            question_id = %input.question_id,
            response = input.response.as_str(),
            "Checklist response saved"
        );
        Ok(id)
    }

    pub async fn list_responses(&self, survey_id: RecordId) -> ClientResult<Vec<ChecklistResponse>> {
        Ok(ChecklistResponseRepo::list_by_survey(self.state.records.as_ref(), survey_id).await?)
    }

    pub async fn delete_response(&self, id: RecordId) -> ClientResult<bool> {
        Ok(ChecklistResponseRepo::delete(self.state.records.as_ref(), id).await?)
    }

    pub async fn list_templates(&self) -> ClientResult<Vec<ChecklistTemplate>> {
        Ok(ChecklistTemplateRepo::list(self.state.records.as_ref()).await?)
    }

    pub async fn list_templates_by_category(
        &self,
        category: &str,
    ) -> ClientResult<Vec<ChecklistTemplate>> {
        Ok(ChecklistTemplateRepo::list_by_category(self.state.records.as_ref(), category).await?)
    }

    pub async fn get_template(&self, id: RecordId) -> ClientResult<ChecklistTemplate> {
        ChecklistTemplateRepo::find_by_id(self.state.records.as_ref(), id)
            .await?
            .ok_or_else(|| {
                ClientError::Core(CoreError::NotFound {
                    entity: "Checklist template",
                    id: id.to_string(),
                })
            })
    }

    /// Progress of a survey against one template.
    pub async fn progress(
        &self,
        survey_id: RecordId,
        template_id: RecordId,
    ) -> ClientResult<ChecklistProgress> {
        let template = self.get_template(template_id).await?;
        let responses = self.list_responses(survey_id).await?;
        Ok(checklist_progress(&template, &responses))
    }
}
