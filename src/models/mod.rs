mod forecast;
mod insight;
mod observation;
mod report;

pub use forecast::{ForecastMethod, ForecastPoint, ForecastResult};
pub use insight::{
    Anomaly, AnomalyKind, InsightReport, PriceAction, PriceHint, ProductInsight, ReorderDecision,
    Severity, SkippedProduct, Urgency,
};
pub use observation::{DailyObservation, NormalizedSeries, SalesRecord};
pub use report::{ActionPriority, WeeklyActionPlan};
