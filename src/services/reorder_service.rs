use crate::models::{ForecastPoint, ReorderDecision, Urgency};
use crate::services::stats;

const HIGH_QUANTITY_THRESHOLD: f64 = 100.0;
const MEDIUM_QUANTITY_THRESHOLD: f64 = 50.0;
const HIGH_DAYS_OF_STOCK: f64 = 3.0;
const MEDIUM_DAYS_OF_STOCK: f64 = 7.0;

/// Convert a 7-day forecast into a reorder quantity and urgency tier.
///
/// Quantity is the forecast demand plus a safety-stock margin. Urgency uses
/// days-of-stock when the caller knows current stock; merchant data often
/// lacks it, so the fallback grades on the order size itself.
pub fn recommend(
    forecast7: &[ForecastPoint],
    safety: f64,
    stock_on_hand: Option<f64>,
) -> ReorderDecision {
    let demand: f64 = forecast7.iter().map(|p| p.yhat).sum();
    let quantity = stats::round2(demand * (1.0 + safety));

    let urgency = match stock_on_hand {
        Some(stock) => {
            let daily_demand = demand / 7.0;
            if daily_demand <= 0.0 {
                // No forecast demand: stock lasts indefinitely.
                Urgency::Low
            } else {
                let days_of_stock = stock / daily_demand;
                if days_of_stock < HIGH_DAYS_OF_STOCK {
                    Urgency::High
                } else if days_of_stock < MEDIUM_DAYS_OF_STOCK {
                    Urgency::Medium
                } else {
                    Urgency::Low
                }
            }
        }
        None => {
            if quantity > HIGH_QUANTITY_THRESHOLD {
                Urgency::High
            } else if quantity > MEDIUM_QUANTITY_THRESHOLD {
                Urgency::Medium
            } else {
                Urgency::Low
            }
        }
    };

    ReorderDecision { quantity, urgency }
}
