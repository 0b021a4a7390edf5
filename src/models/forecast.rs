use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single point in a demand forecast time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Complete demand forecast for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    /// Band-derived confidence score in [0, 100].
    pub confidence: f64,
    pub method: ForecastMethod,
}

/// Forecasting methodology used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    MovingAverage,
    TrendAdjusted,
}

impl ForecastMethod {
    pub fn description(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => {
                "Trailing average of recent demand with day-of-week adjustment"
            }
            ForecastMethod::TrendAdjusted => {
                "Smoothed level plus trend with day-of-week adjustment"
            }
        }
    }
}
