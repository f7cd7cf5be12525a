//! Repository for the `surveys` table.
//!
//! [`SurveyRepo::save`] is the single create-or-update entry point: one
//! network write per call, no local copy kept, no retry.

use shipcheck_core::types::RecordId;

use super::{decode, decode_all, encode, inserted_id};
use crate::backend::{BackendError, Direction, Filter, Query, RecordStore};
use crate::models::survey::{to_backend_record, to_survey, Survey, SurveyInput, SurveyRow};

pub const TABLE: &str = "surveys";

/// Provides CRUD operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert or overwrite a survey, returning its identifier.
    ///
    /// With `existing_id` the whole record is written over the row with that
    /// id and the same id is returned. Without it a new row is inserted and
    /// the backend-assigned id is returned. Failures are logged and returned
    /// unchanged.
    pub async fn save(
        store: &dyn RecordStore,
        input: &SurveyInput,
        existing_id: Option<RecordId>,
    ) -> Result<RecordId, BackendError> {
        let record = encode(&to_backend_record(input))?;

        let result = match existing_id {
            Some(id) => store
                .update(TABLE, &[Filter::eq("id", id)], record)
                .await
                .map(|rows| {
                    if rows.is_empty() {
                        tracing::warn!(survey_id = %id, "Survey update matched no rows");
                    }
                    id
                }),
            None => store
                .insert(TABLE, record)
                .await
                .and_then(|row| inserted_id(TABLE, &row)),
        };

        match &result {
            Ok(id) => tracing::debug!(
                survey_id = %id,
                created = existing_id.is_none(),
                "Survey saved"
            ),
            Err(e) => tracing::error!(
                survey_id = ?existing_id,
                error = %e,
                "Failed to save survey"
            ),
        }
        result
    }

    /// Find a survey by its ID.
    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> Result<Option<Survey>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter()
            .next()
            .map(|row| decode::<SurveyRow>(row).map(to_survey))
            .transpose()
    }

    /// List all visible surveys, most recently updated first.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<Survey>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().order_by("updated_at", Direction::Desc))
            .await?;
        Ok(decode_all::<SurveyRow>(rows)?
            .into_iter()
            .map(to_survey)
            .collect())
    }

    /// List surveys owned by one user, most recently updated first.
    pub async fn list_by_user(
        store: &dyn RecordStore,
        user_id: RecordId,
    ) -> Result<Vec<Survey>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("user_id", user_id)
                    .order_by("updated_at", Direction::Desc),
            )
            .await?;
        Ok(decode_all::<SurveyRow>(rows)?
            .into_iter()
            .map(to_survey)
            .collect())
    }

    /// Delete a survey by ID. Returns `true` if a row was deleted.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<bool, BackendError> {
        let deleted = store.delete(TABLE, &[Filter::eq("id", id)]).await?;
        Ok(deleted > 0)
    }
}
