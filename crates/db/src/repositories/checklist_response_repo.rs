//! Repository for the `checklist_responses` table.

use shipcheck_core::types::RecordId;

use super::{decode, decode_all, encode, inserted_id};
use crate::backend::{BackendError, Direction, Filter, Query, RecordStore};
use crate::models::checklist_response::{ChecklistResponse, CreateChecklistResponse};

pub const TABLE: &str = "checklist_responses";

/// Provides CRUD operations for checklist responses.
pub struct ChecklistResponseRepo;

impl ChecklistResponseRepo {
    /// Insert a new answer, or overwrite the row with `existing_id`.
    pub async fn save(
        store: &dyn RecordStore,
        input: &CreateChecklistResponse,
        existing_id: Option<RecordId>,
    ) -> Result<RecordId, BackendError> {
        let record = encode(input)?;
        match existing_id {
            Some(id) => {
                store.update(TABLE, &[Filter::eq("id", id)], record).await?;
                Ok(id)
            }
            None => {
                let row = store.insert(TABLE, record).await?;
                inserted_id(TABLE, &row)
            }
        }
    }

    /// Find a response by its ID.
    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> Result<Option<ChecklistResponse>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// Find the existing answer to one question within a survey.
    pub async fn find_for_question(
        store: &dyn RecordStore,
        survey_id: RecordId,
        question_id: &str,
    ) -> Result<Option<ChecklistResponse>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("survey_id", survey_id)
                    .eq("question_id", question_id)
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// List every answer in a survey, oldest first.
    pub async fn list_by_survey(
        store: &dyn RecordStore,
        survey_id: RecordId,
    ) -> Result<Vec<ChecklistResponse>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("survey_id", survey_id)
                    .order_by("created_at", Direction::Asc),
            )
            .await?;
        decode_all(rows)
    }

    /// Delete a response by ID. Returns `true` if a row was deleted.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<bool, BackendError> {
        let deleted = store.delete(TABLE, &[Filter::eq("id", id)]).await?;
        Ok(deleted > 0)
    }
}
