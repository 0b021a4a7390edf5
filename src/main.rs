use anyhow::Context;

use merchantiq_engine::config::EngineConfig;
use merchantiq_engine::logging::{self, LoggingConfig};
use merchantiq_engine::services::{csv_import_service, insight_service, report_service};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging(&LoggingConfig::from_env());

    let path = std::env::args()
        .nth(1)
        .context("Usage: merchantiq-engine <sales.csv>")?;
    let csv_text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path))?;

    let records = csv_import_service::parse_sales_csv(&csv_text)?;
    tracing::info!("🧾 Parsed {} sales rows from {}", records.len(), path);

    let config = EngineConfig::from_env();
    let report = insight_service::analyze_merchant(&records, &config)?;
    tracing::info!(
        "🚀 Analyzed {} products ({} skipped for thin history)",
        report.products.len(),
        report.skipped.len()
    );

    let plan = report_service::build_weekly_plan(&report.products);
    let output = serde_json::json!({
        "insights": report,
        "weekly_plan": plan,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
