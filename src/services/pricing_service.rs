use crate::models::{NormalizedSeries, PriceAction, PriceHint};
use crate::services::stats;

const MIN_HISTORY_DAYS: usize = 14;
const CHANGE_THRESHOLD: f64 = 0.2;
// Discounts cut deeper than increases: recovering lost volume is worth more
// margin than capturing upside.
const INCREASE_FRACTION: f64 = 0.03;
const DISCOUNT_FRACTION: f64 = 0.05;

/// Suggest a price action from the week-over-week demand change.
///
/// Needs two full weeks of history and a non-zero prior week; otherwise there
/// is no signal to price against and no hint is returned.
pub fn hint(series: &NormalizedSeries, prices: &[f64]) -> Option<PriceHint> {
    let quantities = series.quantities();
    if quantities.len() < MIN_HISTORY_DAYS {
        return None;
    }

    let last7: f64 = quantities[quantities.len() - 7..].iter().sum();
    let prev7: f64 = quantities[quantities.len() - 14..quantities.len() - 7]
        .iter()
        .sum();
    if prev7 <= 0.0 {
        return None;
    }

    let change = (last7 - prev7) / prev7;
    let median_price = stats::median(prices);

    let hint = if change > CHANGE_THRESHOLD {
        PriceHint {
            action: PriceAction::Increase,
            suggested_delta: stats::round2(median_price * INCREASE_FRACTION),
            reason: "Demand trending up (WoW > 20%)".to_string(),
        }
    } else if change < -CHANGE_THRESHOLD {
        PriceHint {
            action: PriceAction::Discount,
            suggested_delta: stats::round2(median_price * DISCOUNT_FRACTION),
            reason: "Demand trending down (WoW < -20%)".to_string(),
        }
    } else {
        PriceHint {
            action: PriceAction::Hold,
            suggested_delta: 0.0,
            reason: "Demand stable week-over-week".to_string(),
        }
    };

    Some(hint)
}
