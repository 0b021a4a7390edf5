use chrono::Datelike;

use crate::models::{Anomaly, AnomalyKind, ForecastResult, NormalizedSeries};
use crate::services::stats;

// A ±10% tolerance band separates a real trend from noise.
const TREND_TOLERANCE: f64 = 0.1;
// Weekday variation above 30% of its own mean reads as a weekly cycle.
const SEASONALITY_VARIATION: f64 = 0.3;
const SEASONALITY_MIN_DAYS: usize = 28;

/// Compose a short, deterministic rationale for a product's demand picture.
///
/// Pure composition over the other components' outputs; no external calls.
pub fn explain(
    series: &NormalizedSeries,
    anomalies: &[Anomaly],
    forecast: &ForecastResult,
) -> String {
    if series.is_empty() {
        return "No sales history available for this product.".to_string();
    }

    let quantities = series.quantities();
    let overall_avg = stats::mean(&quantities);
    let recent_avg = stats::mean(&quantities[quantities.len().saturating_sub(7)..]);

    let mut parts = Vec::new();

    let trend = if recent_avg > overall_avg * (1.0 + TREND_TOLERANCE) {
        "increasing"
    } else if recent_avg < overall_avg * (1.0 - TREND_TOLERANCE) {
        "decreasing"
    } else {
        "stable"
    };
    parts.push(format!(
        "Demand is {} ({:.1}/day over the last week vs {:.1}/day overall)",
        trend, recent_avg, overall_avg
    ));

    if has_weekly_seasonality(series) {
        parts.push("sales follow a pronounced day-of-week pattern".to_string());
    }

    if !anomalies.is_empty() {
        let kinds: Vec<&str> = anomalies.iter().map(|a| kind_label(a.kind)).collect();
        parts.push(format!("recent activity flagged: {}", kinds.join(", ")));
    }

    let forecast_avg = stats::mean(
        &forecast
            .points
            .iter()
            .map(|p| p.yhat)
            .collect::<Vec<f64>>(),
    );
    let outlook = if forecast_avg > recent_avg * (1.0 + TREND_TOLERANCE) {
        "the forecast points to further growth"
    } else if forecast_avg < recent_avg * (1.0 - TREND_TOLERANCE) {
        "the forecast points to a decline"
    } else {
        "the forecast suggests demand will hold steady"
    };
    parts.push(outlook.to_string());

    format!("{}.", parts.join("; "))
}

fn kind_label(kind: AnomalyKind) -> &'static str {
    match kind {
        AnomalyKind::Spike => "demand spike",
        AnomalyKind::Drop => "demand drop",
        AnomalyKind::Outlier => "statistical outlier",
        AnomalyKind::SlowMoving => "slow movement",
    }
}

/// Weekday means varying by more than 30% of their own mean indicate a weekly
/// cycle. Needs four weeks of history to be meaningful.
fn has_weekly_seasonality(series: &NormalizedSeries) -> bool {
    if series.len() < SEASONALITY_MIN_DAYS {
        return false;
    }

    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for obs in series.observations() {
        let weekday = obs.date.weekday().num_days_from_monday() as usize;
        sums[weekday] += obs.quantity;
        counts[weekday] += 1;
    }

    let means: Vec<f64> = (0..7)
        .filter(|&w| counts[w] > 0)
        .map(|w| sums[w] / counts[w] as f64)
        .collect();

    let mean_of_means = stats::mean(&means);
    if mean_of_means <= 0.0 {
        return false;
    }
    stats::stdev(&means) > SEASONALITY_VARIATION * mean_of_means
}
