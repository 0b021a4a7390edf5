use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{DailyObservation, NormalizedSeries};

/// Normalize raw per-product observations into a gap-free daily series.
///
/// Quantities sharing a date are summed, the result is sorted ascending, and
/// every calendar day between the first and last observation is present
/// (absent days filled with 0). Pure function of its input.
pub fn normalize(observations: &[DailyObservation]) -> NormalizedSeries {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations {
        *by_date.entry(obs.date).or_insert(0.0) += obs.quantity;
    }

    if by_date.is_empty() {
        return NormalizedSeries::default();
    }
    let observed_days = by_date.len();

    let first = *by_date.keys().next().unwrap();
    let last = *by_date.keys().next_back().unwrap();

    let mut filled = Vec::with_capacity((last - first).num_days() as usize + 1);
    let mut day = first;
    while day <= last {
        filled.push(DailyObservation {
            date: day,
            quantity: by_date.get(&day).copied().unwrap_or(0.0),
        });
        day += Duration::days(1);
    }

    NormalizedSeries::new(filled, observed_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, quantity: f64) -> DailyObservation {
        DailyObservation {
            date: date.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_normalize_fills_gaps_with_zero() {
        let series = normalize(&[obs("2024-03-01", 5.0), obs("2024-03-04", 2.0)]);

        assert_eq!(series.len(), 4);
        let quantities = series.quantities();
        assert_eq!(quantities, vec![5.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_normalize_sums_same_day_duplicates() {
        let series = normalize(&[
            obs("2024-03-01", 5.0),
            obs("2024-03-01", 3.0),
            obs("2024-03-02", 1.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.quantities(), vec![8.0, 1.0]);
        assert_eq!(series.observed_days(), 2);
    }

    #[test]
    fn test_normalize_sorts_unordered_input() {
        let series = normalize(&[obs("2024-03-03", 1.0), obs("2024-03-01", 2.0)]);

        let dates: Vec<_> = series.observations().iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![
                "2024-03-01".parse::<NaiveDate>().unwrap(),
                "2024-03-02".parse().unwrap(),
                "2024-03-03".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn test_normalize_length_invariant() {
        let series = normalize(&[obs("2024-01-01", 1.0), obs("2024-02-29", 1.0)]);
        // 2024 is a leap year: Jan 1 through Feb 29 inclusive is 60 days.
        assert_eq!(series.len(), 60);
    }

    #[test]
    fn test_normalize_empty_input() {
        let series = normalize(&[]);
        assert!(series.is_empty());
        assert_eq!(series.observed_days(), 0);
    }
}
