use chrono::{Datelike, Duration, Utc};
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{ForecastMethod, ForecastPoint, ForecastResult, NormalizedSeries};
use crate::services::stats;

// Holt smoothing parameters for the trend-adjusted model.
const LEVEL_ALPHA: f64 = 0.3;
const TREND_BETA: f64 = 0.1;

/// Produce a `days`-ahead demand forecast with an uncertainty band and a
/// confidence score.
///
/// Model selection is an explicit data-sufficiency decision: series with at
/// least `config.trend_model_min_days` of history use smoothed level plus
/// trend, everything else a trailing moving average. Both models share the
/// day-of-week seasonality adjustment, band construction, and confidence
/// scoring below.
///
/// This function never fails: empty input yields a zero forecast at fixed
/// confidence 50, and every other degenerate shape (all-zero demand,
/// zero-variance history) has a numeric fallback.
pub fn forecast(series: &NormalizedSeries, days: usize, config: &EngineConfig) -> ForecastResult {
    let Some(last_date) = series.last_date() else {
        return degenerate_forecast(days);
    };

    let quantities = series.quantities();
    let method = if series.len() >= config.trend_model_min_days {
        ForecastMethod::TrendAdjusted
    } else {
        ForecastMethod::MovingAverage
    };
    debug!(
        "Forecasting {} days from {} history days via {:?}",
        days,
        series.len(),
        method
    );

    let (level, trend) = match method {
        ForecastMethod::MovingAverage => (moving_average_level(&quantities), 0.0),
        ForecastMethod::TrendAdjusted => holt_level_trend(&quantities),
    };

    let factors = seasonality_factors(series);
    let fixed_band = history_band(&quantities, config);

    let mut points = Vec::with_capacity(days);
    for step in 1..=days {
        let date = last_date + Duration::days(step as i64);
        let weekday = date.weekday().num_days_from_monday() as usize;
        let yhat = ((level + trend * step as f64) * factors[weekday]).max(0.0);

        // Thin history has no volatility to estimate a band from, so fall
        // back to a fixed relative width.
        let band = match fixed_band {
            Some(width) => width,
            None => (yhat * config.thin_band_frac).max(1.0),
        };

        points.push(ForecastPoint {
            ds: date,
            yhat: stats::round2(yhat),
            yhat_lower: stats::round2((yhat - band).max(0.0)),
            yhat_upper: stats::round2(yhat + band),
        });
    }

    let confidence = confidence_score(&points, series.len(), config);

    ForecastResult {
        points,
        confidence,
        method,
    }
}

/// Zero forecast for a product with no usable history, dated from tomorrow.
fn degenerate_forecast(days: usize) -> ForecastResult {
    let today = Utc::now().date_naive();
    let points = (1..=days)
        .map(|step| ForecastPoint {
            ds: today + Duration::days(step as i64),
            yhat: 0.0,
            yhat_lower: 0.0,
            yhat_upper: 0.0,
        })
        .collect();

    ForecastResult {
        points,
        // No signal either way: moderate default confidence.
        confidence: 50.0,
        method: ForecastMethod::MovingAverage,
    }
}

/// Base demand level: trailing 7-day average when enough history exists,
/// otherwise an adaptive shorter window, falling back to the overall mean
/// when even that window exceeds the series.
fn moving_average_level(quantities: &[f64]) -> f64 {
    let window = if quantities.len() >= 7 {
        7
    } else {
        (quantities.len() / 2).clamp(3, 7)
    };

    if window > quantities.len() {
        return stats::mean(quantities);
    }
    stats::mean(&quantities[quantities.len() - window..])
}

/// Holt's linear method (double exponential smoothing): carry a smoothed
/// level and trend across the history, project both forward.
fn holt_level_trend(quantities: &[f64]) -> (f64, f64) {
    let mut level = quantities[0];
    let mut trend = if quantities.len() > 1 {
        quantities[1] - quantities[0]
    } else {
        0.0
    };

    for &value in &quantities[1..] {
        let prev_level = level;
        level = LEVEL_ALPHA * value + (1.0 - LEVEL_ALPHA) * (level + trend);
        trend = TREND_BETA * (level - prev_level) + (1.0 - TREND_BETA) * trend;
    }

    (level, trend)
}

/// Per-weekday demand multipliers (index 0 = Monday), normalized so the
/// factors average to 1. Under 7 days of history there is no weekly cycle to
/// learn, so every factor is 1.
fn seasonality_factors(series: &NormalizedSeries) -> [f64; 7] {
    if series.len() < 7 {
        return [1.0; 7];
    }

    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for obs in series.observations() {
        let weekday = obs.date.weekday().num_days_from_monday() as usize;
        sums[weekday] += obs.quantity;
        counts[weekday] += 1;
    }

    let mut means = [0.0_f64; 7];
    for weekday in 0..7 {
        if counts[weekday] > 0 {
            means[weekday] = sums[weekday] / counts[weekday] as f64;
        }
    }

    let overall = stats::mean(&means);
    let denom = if overall != 0.0 { overall } else { 1.0 };
    means.map(|m| m / denom)
}

/// Volatility-based band width, available once at least 7 days of history
/// exist: 1.5x the standard deviation of the trailing (up to) 28 days,
/// never narrower than 1 unit.
fn history_band(quantities: &[f64], config: &EngineConfig) -> Option<f64> {
    if quantities.len() < 7 {
        return None;
    }
    let window = quantities.len().min(28);
    let sd = stats::stdev(&quantities[quantities.len() - window..]);
    Some((sd * config.band_stdev_mult).max(1.0))
}

/// Narrower relative bands yield higher confidence, penalized for thin
/// history and floored so a non-empty series never reads as totally
/// unreliable.
fn confidence_score(points: &[ForecastPoint], history_len: usize, config: &EngineConfig) -> f64 {
    let widths: Vec<f64> = points.iter().map(|p| p.yhat_upper - p.yhat_lower).collect();
    let yhats: Vec<f64> = points.iter().map(|p| p.yhat).collect();

    let avg_yhat = stats::mean(&yhats);
    let denom = if avg_yhat > 0.0 { avg_yhat } else { 1.0 };

    let mut confidence = (100.0 - stats::mean(&widths) / denom * 100.0).clamp(0.0, 100.0);

    let shortfall = config.volume_baseline_days.saturating_sub(history_len);
    confidence -= shortfall as f64 * config.volume_penalty_per_day;

    stats::round2(confidence.max(config.confidence_floor))
}
