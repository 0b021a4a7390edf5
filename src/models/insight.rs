use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::forecast::ForecastPoint;

/// Category of a flagged demand irregularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Spike,
    Drop,
    Outlier,
    SlowMoving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A statistically unusual demand pattern, with the numeric evidence that
/// triggered it. Evidence fields are kind-specific; the rest stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_velocity: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Suggested reorder quantity and how soon it should be placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderDecision {
    pub quantity: f64,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAction {
    Increase,
    Discount,
    Hold,
}

/// Pricing suggestion derived from week-over-week demand change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHint {
    pub action: PriceAction,
    pub suggested_delta: f64,
    pub reason: String,
}

/// Everything the engine produces for a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInsight {
    pub product_name: String,
    /// 7-day forecast (the first week of `forecast_30d`).
    pub forecast: Vec<ForecastPoint>,
    pub forecast_30d: Vec<ForecastPoint>,
    pub confidence_score: f64,
    pub anomalies: Vec<Anomaly>,
    pub reorder: ReorderDecision,
    pub price_hint: Option<PriceHint>,
    pub demand_reasoning: String,
}

/// A product excluded from analysis for lack of history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedProduct {
    pub product_name: String,
    pub reason: String,
    pub observed_days: usize,
}

/// Per-merchant aggregate of product insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    pub products: Vec<ProductInsight>,
    pub skipped: Vec<SkippedProduct>,
    pub generated_at: DateTime<Utc>,
}
