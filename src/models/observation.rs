use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One parsed row of merchant sales data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product_name: String,
    pub quantity_sold: f64,
    pub price: f64,
    pub revenue: f64,
}

/// A single day of demand for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub quantity: f64,
}

/// Gap-free daily demand series, sorted ascending by date.
///
/// Invariant: length equals the number of calendar days between the first and
/// last observation inclusive; days without sales carry quantity 0.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSeries {
    observations: Vec<DailyObservation>,
    observed_days: usize,
}

impl NormalizedSeries {
    pub(crate) fn new(observations: Vec<DailyObservation>, observed_days: usize) -> Self {
        Self {
            observations,
            observed_days,
        }
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.quantity).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Number of distinct dates that carried a sales row before gap-filling.
    pub fn observed_days(&self) -> usize {
        self.observed_days
    }
}
