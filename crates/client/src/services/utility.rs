use serde::Serialize;
use shipcheck_core::types::RecordId;
use shipcheck_core::utility::{summarize_consumption, ConsumptionSummary, SupplierPalette};
use shipcheck_db::models::utility_reading::{CreateUtilityReading, UtilityReading};
use shipcheck_db::repositories::UtilityReadingRepo;

use crate::error::ClientResult;
use crate::insight::{consumption_prompt, InsightClient};
use crate::state::AppState;

/// Readings plus their aggregated totals, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityDashboard {
    /// Newest reading date first.
    pub readings: Vec<UtilityReading>,
    pub summary: ConsumptionSummary,
}

impl UtilityDashboard {
    pub fn build(readings: Vec<UtilityReading>, palette: &SupplierPalette) -> Self {
        let samples: Vec<_> = readings.iter().map(UtilityReading::to_sample).collect();
        let summary = summarize_consumption(&samples, palette);
        Self { readings, summary }
    }
}

/// Utility consumption tracking.
#[derive(Clone)]
pub struct UtilityService {
    state: AppState,
    palette: SupplierPalette,
}

impl UtilityService {
    pub fn new(state: AppState, palette: SupplierPalette) -> Self {
        Self { state, palette }
    }

    /// Record a reading. A missing unit defaults to the utility's usual unit.
    pub async fn record_reading(&self, input: CreateUtilityReading) -> ClientResult<UtilityReading> {
        input.check()?;
        let input = input.with_default_unit();
        let reading = UtilityReadingRepo::create(self.state.records.as_ref(), &input).await?;
        tracing::debug!(
            reading_id = %reading.id,
            utility = reading.utility.as_str(),
            "Utility reading recorded"
        );
        Ok(reading)
    }

    pub async fn list_readings(&self, user_id: Option<RecordId>) -> ClientResult<Vec<UtilityReading>> {
        Ok(UtilityReadingRepo::list(self.state.records.as_ref(), user_id).await?)
    }

    pub async fn delete_reading(&self, id: RecordId) -> ClientResult<bool> {
        Ok(UtilityReadingRepo::delete(self.state.records.as_ref(), id).await?)
    }

    pub async fn dashboard(&self, user_id: Option<RecordId>) -> ClientResult<UtilityDashboard> {
        let readings = self.list_readings(user_id).await?;
        Ok(UtilityDashboard::build(readings, &self.palette))
    }

    /// Ask the insight endpoint to comment on the current dashboard.
    pub async fn dashboard_insight(
        &self,
        insight: &InsightClient,
        user_id: Option<RecordId>,
    ) -> ClientResult<String> {
        let dashboard = self.dashboard(user_id).await?;
        Ok(insight
            .fetch_insight(&consumption_prompt(&dashboard.summary))
            .await?)
    }
}
