use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use crate::config::EngineConfig;
use crate::errors::AppError;
use crate::models::{
    DailyObservation, ForecastPoint, InsightReport, ProductInsight, SalesRecord, SkippedProduct,
};
use crate::services::{
    anomaly_service, forecasting_service, pricing_service, reasoning_service, reorder_service,
    series,
};

const FORECAST_HORIZON_DAYS: usize = 30;
const REORDER_HORIZON_DAYS: usize = 7;

/// Run the full per-product pipeline: normalize, forecast, detect anomalies,
/// recommend a reorder, hint at pricing, and explain the result.
pub fn analyze_product(
    product_name: &str,
    records: &[SalesRecord],
    config: &EngineConfig,
) -> ProductInsight {
    let observations: Vec<DailyObservation> = records
        .iter()
        .map(|r| DailyObservation {
            date: r.date,
            quantity: r.quantity_sold,
        })
        .collect();
    let series = series::normalize(&observations);

    let forecast_30d = forecasting_service::forecast(&series, FORECAST_HORIZON_DAYS, config);
    let forecast7: Vec<ForecastPoint> = forecast_30d
        .points
        .iter()
        .take(REORDER_HORIZON_DAYS)
        .cloned()
        .collect();

    let anomalies = anomaly_service::detect(&series);

    // Stock-on-hand is not part of the sales table, so urgency falls back to
    // the quantity-threshold policy.
    let reorder = reorder_service::recommend(&forecast7, config.safety_stock, None);

    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let price_hint = pricing_service::hint(&series, &prices);

    let demand_reasoning = reasoning_service::explain(&series, &anomalies, &forecast_30d);

    ProductInsight {
        product_name: product_name.to_string(),
        forecast: forecast7,
        forecast_30d: forecast_30d.points,
        confidence_score: forecast_30d.confidence,
        anomalies,
        reorder,
        price_hint,
        demand_reasoning,
    }
}

/// Analyze every product in a merchant's sales table.
///
/// Products with too few distinct sale-days are skipped and reported, not
/// failed; the whole request errors only when nothing qualifies.
pub fn analyze_merchant(
    records: &[SalesRecord],
    config: &EngineConfig,
) -> Result<InsightReport, AppError> {
    let mut by_product: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
    for record in records {
        let name = record.product_name.trim();
        if name.is_empty() {
            continue;
        }
        by_product
            .entry(name.to_string())
            .or_default()
            .push(record.clone());
    }

    let mut products = Vec::new();
    let mut skipped = Vec::new();

    for (name, product_records) in &by_product {
        let observed_days = product_records
            .iter()
            .map(|r| r.date)
            .collect::<std::collections::BTreeSet<_>>()
            .len();

        if observed_days < config.min_sale_days {
            info!(
                "Skipping {}: {} sale-days, minimum is {}",
                name, observed_days, config.min_sale_days
            );
            skipped.push(SkippedProduct {
                product_name: name.clone(),
                reason: format!(
                    "only {} sale-days of history, {} required",
                    observed_days, config.min_sale_days
                ),
                observed_days,
            });
            continue;
        }

        let insight = analyze_product(name, product_records, config);
        info!(
            "Analyzed {}: confidence {:.0}, {} anomalies",
            name,
            insight.confidence_score,
            insight.anomalies.len()
        );
        products.push(insight);
    }

    if products.is_empty() {
        let detail = if skipped.is_empty() {
            "dataset contained no usable sales rows".to_string()
        } else {
            skipped
                .iter()
                .map(|s| format!("{} ({})", s.product_name, s.reason))
                .collect::<Vec<_>>()
                .join("; ")
        };
        return Err(AppError::NoQualifyingProducts(detail));
    }

    Ok(InsightReport {
        products,
        skipped,
        generated_at: Utc::now(),
    })
}
