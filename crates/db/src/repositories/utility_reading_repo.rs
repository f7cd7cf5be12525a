//! Repository for the `utility_readings` table.

use shipcheck_core::types::RecordId;
use shipcheck_core::utility::UtilityKind;

use super::{decode, decode_all, encode};
use crate::backend::{BackendError, Direction, Filter, Query, RecordStore};
use crate::models::utility_reading::{CreateUtilityReading, UtilityReading};

pub const TABLE: &str = "utility_readings";

/// Provides CRUD operations for utility readings.
pub struct UtilityReadingRepo;

impl UtilityReadingRepo {
    /// Record a reading, returning the stored row.
    pub async fn create(
        store: &dyn RecordStore,
        input: &CreateUtilityReading,
    ) -> Result<UtilityReading, BackendError> {
        let row = store.insert(TABLE, encode(input)?).await?;
        decode(row)
    }

    /// List readings, newest reading date first. Restricted to one user
    /// when `user_id` is given.
    pub async fn list(
        store: &dyn RecordStore,
        user_id: Option<RecordId>,
    ) -> Result<Vec<UtilityReading>, BackendError> {
        let mut query = Query::new();
        if let Some(user_id) = user_id {
            query = query.eq("user_id", user_id);
        }
        let rows = store
            .select(TABLE, &query.order_by("reading_date", Direction::Desc))
            .await?;
        decode_all(rows)
    }

    /// List readings of one utility, newest first.
    pub async fn list_by_utility(
        store: &dyn RecordStore,
        utility: UtilityKind,
    ) -> Result<Vec<UtilityReading>, BackendError> {
        let rows = store
            .select(
                TABLE,
                &Query::new()
                    .eq("utility", utility.as_str())
                    .order_by("reading_date", Direction::Desc),
            )
            .await?;
        decode_all(rows)
    }

    /// Delete a reading by ID. Returns `true` if a row was deleted.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<bool, BackendError> {
        let deleted = store.delete(TABLE, &[Filter::eq("id", id)]).await?;
        Ok(deleted > 0)
    }
}
