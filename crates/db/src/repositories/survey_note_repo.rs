//! Repository for the `survey_notes` table.

use shipcheck_core::types::RecordId;

use super::{decode, decode_all, encode};
use crate::backend::{BackendError, Direction, Filter, Query, RecordStore};
use crate::models::survey_note::{CreateSurveyNote, SurveyNote, UpdateSurveyNote};

pub const TABLE: &str = "survey_notes";

/// Provides CRUD operations for survey notes.
pub struct SurveyNoteRepo;

impl SurveyNoteRepo {
    /// Create a new note, returning the created row.
    pub async fn create(
        store: &dyn RecordStore,
        input: &CreateSurveyNote,
    ) -> Result<SurveyNote, BackendError> {
        let row = store.insert(TABLE, encode(input)?).await?;
        decode(row)
    }

    /// Find a note by its ID.
    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> Result<Option<SurveyNote>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// List notes for a survey in creation order.
    pub async fn list_by_survey(
        store: &dyn RecordStore,
        survey_id: RecordId,
    ) -> Result<Vec<SurveyNote>, BackendError> {
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

    /// List notes for one zone of a survey in creation order.
    pub async fn list_by_zone(
        store: &dyn RecordStore,
        survey_id: RecordId,
        zone: &str,
    ) -> Result<Vec<SurveyNote>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("survey_id", survey_id)
                    .eq("zone", zone)
                    .order_by("created_at", Direction::Asc),
            )
            .await?;
        decode_all(rows)
    }

    /// Update a note by ID, returning the updated row.
    pub async fn update(
        store: &dyn RecordStore,
        id: RecordId,
        input: &UpdateSurveyNote,
    ) -> Result<Option<SurveyNote>, BackendError> {
        let rows = store
            .update(TABLE, &[Filter::eq("id", id)], encode(input)?)
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// Delete a note by ID. Returns `true` if a row was deleted.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<bool, BackendError> {
        let deleted = store.delete(TABLE, &[Filter::eq("id", id)]).await?;
        Ok(deleted > 0)
    }
}
