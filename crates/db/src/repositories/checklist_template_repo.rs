//! Repository for the `checklist_templates` table. Templates are managed
//! elsewhere; this crate only reads them.

use shipcheck_core::types::RecordId;

use super::{decode, decode_all};
use crate::backend::{BackendError, Direction, Query, RecordStore};
use crate::models::checklist_template::ChecklistTemplate;

pub const TABLE: &str = "checklist_templates";

pub struct ChecklistTemplateRepo;

impl ChecklistTemplateRepo {
    /// List all templates by name.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<ChecklistTemplate>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().order_by("name", Direction::Asc))
            .await?;
        decode_all(rows)
    }

    pub async fn list_by_category(
        store: &dyn RecordStore,
        category: &str,
    ) -> Result<Vec<ChecklistTemplate>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("category", category)
                    .order_by("name", Direction::Asc),
            )
            .await?;
        decode_all(rows)
    }

    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: RecordId,
    ) -> Result<Option<ChecklistTemplate>, BackendError> {
        let rows = store
            .select(TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(decode).transpose()
    }
}
