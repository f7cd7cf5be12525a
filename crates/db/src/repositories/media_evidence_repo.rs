//! Repository for the `media_evidence` table.

use shipcheck_core::types::RecordId;

use super::{decode, decode_all, encode};
use crate::backend::{BackendError, Direction, Filter, Query, RecordStore};
use crate::models::media_evidence::{CreateMediaEvidence, MediaEvidence};

pub const TABLE: &str = "media_evidence";

/// Provides CRUD operations for media evidence metadata.
pub struct MediaEvidenceRepo;

impl MediaEvidenceRepo {
    /// Insert a metadata row, returning the stored row.
    pub async fn create(
        store: &dyn RecordStore,
        input: &CreateMediaEvidence,
    ) -> Result<MediaEvidence, BackendError> {
        let row = store.insert(TABLE, encode(input)?).await?;
        decode(row)
    }

    /// Find a metadata row by its ID.
    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> Result<Option<MediaEvidence>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// List attachments of one checklist response, oldest first.
    pub async fn list_by_response(
        store: &dyn RecordStore,
        response_id: RecordId,
    ) -> Result<Vec<MediaEvidence>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("response_id", response_id)
                    .order_by("created_at", Direction::Asc),
            )
            .await?;
        decode_all(rows)
    }

    /// List every attachment in a survey, oldest first.
    pub async fn list_by_survey(
        store: &dyn RecordStore,
        survey_id: RecordId,
    ) -> Result<Vec<MediaEvidence>, BackendError> {
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

    /// Delete a metadata row by ID. Returns `true` if a row was deleted.
    /// The stored object is not touched.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<bool, BackendError> {
        let deleted = store.delete(TABLE, &[Filter::eq("id", id)]).await?;
        Ok(deleted > 0)
    }
}
