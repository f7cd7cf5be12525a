//! Utility meter reading model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shipcheck_core::error::CoreError;
use shipcheck_core::types::{RecordId, Timestamp};
use shipcheck_core::utility::{validate_reading_amounts, UsageSample, UtilityKind};

/// A row from the `utility_readings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityReading {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    pub utility: UtilityKind,
    #[serde(default)]
    pub supplier: String,
    pub reading_date: NaiveDate,
    pub usage: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl UtilityReading {
    pub fn to_sample(&self) -> UsageSample {
        UsageSample {
            utility: self.utility,
            supplier: self.supplier.clone(),
            reading_date: self.reading_date,
            usage: self.usage,
            cost: self.cost,
        }
    }
}

/// DTO for recording a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUtilityReading {
    pub user_id: Option<RecordId>,
    pub utility: UtilityKind,
    pub supplier: String,
    pub reading_date: NaiveDate,
    pub usage: f64,
    /// Defaults to the utility's conventional unit when absent.
    pub unit: Option<String>,
    pub cost: f64,
    pub notes: Option<String>,
}

impl CreateUtilityReading {
    pub fn check(&self) -> Result<(), CoreError> {
        validate_reading_amounts(self.usage, self.cost)
    }

    /// Fill the unit from the utility kind when the caller left it out.
    pub fn with_default_unit(mut self) -> Self {
        if self.unit.as_deref().map_or(true, |u| u.trim().is_empty()) {
            self.unit = Some(self.utility.default_unit().to_string());
        }
        self
    }
}
