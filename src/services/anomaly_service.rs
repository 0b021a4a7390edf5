use crate::models::{Anomaly, AnomalyKind, NormalizedSeries, Severity};
use crate::services::stats;

// Baselines for each check: two full weeks for the week-over-week
// comparisons, four for the z-score window.
const MIN_HISTORY_DAYS: usize = 14;
const OUTLIER_WINDOW: usize = 28;

const WOW_THRESHOLD_PCT: f64 = 30.0;
const WOW_HIGH_PCT: f64 = 50.0;
const Z_THRESHOLD: f64 = 2.5;
const Z_HIGH: f64 = 3.0;
const SLOW_MOVING_FRACTION: f64 = 0.5;

/// Scan a product's history for statistically unusual recent demand.
///
/// Runs independently of the forecast; a product may carry several anomalies
/// at once. Series under 14 days have no baseline and return nothing.
pub fn detect(series: &NormalizedSeries) -> Vec<Anomaly> {
    let quantities = series.quantities();
    if quantities.len() < MIN_HISTORY_DAYS {
        return Vec::new();
    }

    let mut anomalies = Vec::new();

    let last7: f64 = quantities[quantities.len() - 7..].iter().sum();
    let prev7: f64 = quantities[quantities.len() - 14..quantities.len() - 7]
        .iter()
        .sum();

    let wow = if prev7 > 0.0 {
        (last7 - prev7) / prev7 * 100.0
    } else {
        0.0
    };

    if wow > WOW_THRESHOLD_PCT {
        let severity = if wow > WOW_HIGH_PCT {
            Severity::High
        } else {
            Severity::Medium
        };
        anomalies.push(wow_anomaly(AnomalyKind::Spike, wow, severity, "up"));
    } else if wow < -WOW_THRESHOLD_PCT {
        let severity = if wow < -WOW_HIGH_PCT {
            Severity::High
        } else {
            Severity::Medium
        };
        anomalies.push(wow_anomaly(AnomalyKind::Drop, wow, severity, "down"));
    }

    if quantities.len() >= OUTLIER_WINDOW {
        if let Some(anomaly) = detect_outlier(&quantities) {
            anomalies.push(anomaly);
        }
    }

    let hist_mean = stats::mean(&quantities);
    if hist_mean > 0.0 && last7 < SLOW_MOVING_FRACTION * hist_mean * 7.0 {
        let current_velocity = stats::round2(last7 / 7.0);
        let average_velocity = stats::round2(hist_mean);
        anomalies.push(Anomaly {
            kind: AnomalyKind::SlowMoving,
            severity: Severity::Medium,
            change_percent: None,
            z_score: None,
            current_velocity: Some(current_velocity),
            average_velocity: Some(average_velocity),
            description: format!(
                "Selling {:.2} units/day against a historical average of {:.2}",
                current_velocity, average_velocity
            ),
        });
    }

    anomalies
}

fn wow_anomaly(kind: AnomalyKind, wow: f64, severity: Severity, direction: &str) -> Anomaly {
    let change_percent = stats::round2(wow);
    Anomaly {
        kind,
        severity,
        change_percent: Some(change_percent),
        z_score: None,
        current_velocity: None,
        average_velocity: None,
        description: format!(
            "Sales {} {:.2}% week-over-week",
            direction,
            change_percent.abs()
        ),
    }
}

/// Average the z-scores of the last week against the trailing 28-day window.
/// Zero-variance windows have no meaningful z-score and are skipped.
fn detect_outlier(quantities: &[f64]) -> Option<Anomaly> {
    let window = &quantities[quantities.len() - OUTLIER_WINDOW..];
    let z = stats::z_scores(window)?;

    let recent_z = stats::mean(&z[OUTLIER_WINDOW - 7..]);
    if recent_z <= Z_THRESHOLD {
        return None;
    }

    let severity = if recent_z > Z_HIGH {
        Severity::High
    } else {
        Severity::Medium
    };
    let z_score = stats::round2(recent_z);
    Some(Anomaly {
        kind: AnomalyKind::Outlier,
        severity,
        change_percent: None,
        z_score: Some(z_score),
        current_velocity: None,
        average_velocity: None,
        description: format!(
            "Recent week averages a {:.2} z-score against the trailing 28 days",
            z_score
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyObservation;
    use crate::services::series;
    use chrono::{Duration, NaiveDate};

    fn series_from(quantities: &[f64]) -> NormalizedSeries {
        let start: NaiveDate = "2024-03-01".parse().unwrap();
        let observations: Vec<DailyObservation> = quantities
            .iter()
            .enumerate()
            .map(|(i, &quantity)| DailyObservation {
                date: start + Duration::days(i as i64),
                quantity,
            })
            .collect();
        series::normalize(&observations)
    }

    #[test]
    fn test_short_history_returns_nothing() {
        let quantities = vec![100.0; 13];
        assert!(detect(&series_from(&quantities)).is_empty());
    }

    #[test]
    fn test_spike_week_over_week() {
        // 14 days of 10/day, then 7 days of 20/day: +100% WoW.
        let mut quantities = vec![10.0; 14];
        quantities.extend(vec![20.0; 7]);
        let anomalies = detect(&series_from(&quantities));

        let spike = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Spike)
            .expect("spike expected");
        assert_eq!(spike.severity, Severity::High);
        assert!((spike.change_percent.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_spike_is_medium_severity() {
        // +40% WoW sits between the 30% trigger and the 50% high mark.
        let mut quantities = vec![10.0; 7];
        quantities.extend(vec![14.0; 7]);
        let anomalies = detect(&series_from(&quantities));

        let spike = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Spike)
            .expect("spike expected");
        assert_eq!(spike.severity, Severity::Medium);
    }

    #[test]
    fn test_drop_and_slow_moving_together() {
        // 20/day falling to 5/day trips both the WoW drop and the
        // slow-moving velocity check.
        let mut quantities = vec![20.0; 7];
        quantities.extend(vec![5.0; 7]);
        let anomalies = detect(&series_from(&quantities));

        let drop = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Drop)
            .expect("drop expected");
        assert_eq!(drop.severity, Severity::High);
        assert!((drop.change_percent.unwrap() - (-75.0)).abs() < 1e-9);

        let slow = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::SlowMoving)
            .expect("slow_moving expected");
        assert_eq!(slow.severity, Severity::Medium);
        assert!((slow.current_velocity.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_stable_series_is_clean() {
        let quantities = vec![10.0; 28];
        assert!(detect(&series_from(&quantities)).is_empty());
    }

    #[test]
    fn test_zero_variance_window_does_not_panic() {
        // Constant 28-day window: the z-score check must skip, not divide by
        // zero.
        let quantities = vec![10.0; 35];
        let anomalies = detect(&series_from(&quantities));
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Outlier));
    }

    #[test]
    fn test_zero_previous_week_reports_no_change() {
        // prev7 of zero would divide by zero; the ratio is defined as 0.
        let mut quantities = vec![0.0; 14];
        quantities.extend(vec![10.0; 7]);
        let anomalies = detect(&series_from(&quantities));
        assert!(anomalies
            .iter()
            .all(|a| a.kind != AnomalyKind::Spike && a.kind != AnomalyKind::Drop));
    }
}
