//! Household utility tracking: kinds, supplier palette, consumption summary.
//!
//! The summary is a pure function over usage samples so the dashboard can be
//! rebuilt from any list of readings without touching the backend again.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Utility kind
// ---------------------------------------------------------------------------

/// Metered household utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityKind {
    Electricity,
    Water,
    Gas,
    Internet,
    Other,
}

impl UtilityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Water => "water",
            Self::Gas => "gas",
            Self::Internet => "internet",
            Self::Other => "other",
        }
    }

    /// Conventional unit used when a reading does not name one.
    pub fn default_unit(self) -> &'static str {
        match self {
            Self::Electricity => "kWh",
            Self::Water => "m3",
            Self::Gas => "m3",
            Self::Internet => "GB",
            Self::Other => "unit",
        }
    }
}

// ---------------------------------------------------------------------------
// Supplier palette
// ---------------------------------------------------------------------------

/// Colour used for suppliers with no explicit entry.
pub const DEFAULT_SUPPLIER_COLOR: &str = "#64748B";

/// Supplier → display colour mapping, passed explicitly to dashboard builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPalette {
    colors: HashMap<String, String>,
    default_color: String,
}

impl Default for SupplierPalette {
    fn default() -> Self {
        Self {
            colors: HashMap::new(),
            default_color: DEFAULT_SUPPLIER_COLOR.to_string(),
        }
    }
}

impl SupplierPalette {
    /// Add or replace the colour for a supplier. Supplier names are matched
    /// case-insensitively.
    pub fn with_color(mut self, supplier: &str, color: &str) -> Result<Self, CoreError> {
        validate_hex_color(color)?;
        self.colors
            .insert(supplier.trim().to_lowercase(), color.to_string());
        Ok(self)
    }

    /// Replace the fallback colour.
    pub fn with_default_color(mut self, color: &str) -> Result<Self, CoreError> {
        validate_hex_color(color)?;
        self.default_color = color.to_string();
        Ok(self)
    }

    pub fn color_for(&self, supplier: &str) -> &str {
        self.colors
            .get(&supplier.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

/// Validate a `#RRGGBB` colour string.
pub fn validate_hex_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid colour '{color}'. Expected #RRGGBB"
        )))
    }
}

// ---------------------------------------------------------------------------
// Consumption summary
// ---------------------------------------------------------------------------

/// One reading reduced to the values the dashboard aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSample {
    pub utility: UtilityKind,
    pub supplier: String,
    pub reading_date: NaiveDate,
    pub usage: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityTotals {
    pub utility: UtilityKind,
    pub readings: usize,
    pub total_usage: f64,
    pub total_cost: f64,
    /// Mean cost per reading.
    pub average_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    /// `YYYY-MM`.
    pub month: String,
    pub utility: UtilityKind,
    pub usage: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierTotals {
    pub supplier: String,
    pub total_cost: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsumptionSummary {
    pub by_utility: Vec<UtilityTotals>,
    /// Ordered by month, then utility.
    pub by_month: Vec<MonthlyUsage>,
    /// Ordered by descending cost.
    pub by_supplier: Vec<SupplierTotals>,
    pub total_cost: f64,
}

/// Aggregate usage samples into per-utility, per-month and per-supplier totals.
pub fn summarize_consumption(samples: &[UsageSample], palette: &SupplierPalette) -> ConsumptionSummary {
    let mut by_utility: BTreeMap<UtilityKind, (usize, f64, f64)> = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32, UtilityKind), (f64, f64)> = BTreeMap::new();
    let mut by_supplier: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_cost = 0.0;

    for sample in samples {
        let entry = by_utility.entry(sample.utility).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += sample.usage;
        entry.2 += sample.cost;

        let month_key = (
            sample.reading_date.year(),
            sample.reading_date.month(),
            sample.utility,
        );
        let month = by_month.entry(month_key).or_insert((0.0, 0.0));
        month.0 += sample.usage;
        month.1 += sample.cost;

        let supplier = sample.supplier.trim();
        let supplier = if supplier.is_empty() { "Unknown" } else { supplier };
        *by_supplier.entry(supplier.to_string()).or_insert(0.0) += sample.cost;

        total_cost += sample.cost;
    }

    let by_utility = by_utility
        .into_iter()
        .map(|(utility, (readings, total_usage, total_cost))| UtilityTotals {
            utility,
            readings,
            total_usage,
            total_cost,
            average_cost: total_cost / readings as f64,
        })
        .collect();

    let by_month = by_month
        .into_iter()
        .map(|((year, month, utility), (usage, cost))| MonthlyUsage {
            month: format!("{year:04}-{month:02}"),
            utility,
            usage,
            cost,
        })
        .collect();

    let mut by_supplier: Vec<SupplierTotals> = by_supplier
        .into_iter()
        .map(|(supplier, total_cost)| SupplierTotals {
            color: palette.color_for(&supplier).to_string(),
            supplier,
            total_cost,
        })
        .collect();
    by_supplier.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

    ConsumptionSummary {
        by_utility,
        by_month,
        by_supplier,
        total_cost,
    }
}

/// Validate a reading's numeric fields.
pub fn validate_reading_amounts(usage: f64, cost: f64) -> Result<(), CoreError> {
    if !usage.is_finite() || usage < 0.0 {
        return Err(CoreError::Validation(
            "Usage must be a non-negative number".to_string(),
        ));
    }
    if !cost.is_finite() || cost < 0.0 {
        return Err(CoreError::Validation(
            "Cost must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
