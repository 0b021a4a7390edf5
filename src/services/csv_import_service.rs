use std::collections::HashMap;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::warn;

use crate::errors::AppError;
use crate::models::SalesRecord;

const REQUIRED_COLUMNS: [&str; 5] = ["date", "product_name", "quantity_sold", "price", "revenue"];

/// Parse a merchant sales CSV into typed records.
///
/// Headers are matched case-insensitively after trimming. Rows with an
/// unparseable date or a blank product name are dropped rather than failing
/// the whole upload; unparseable numerics coerce to 0. The only hard errors
/// are a malformed header row and missing required columns.
pub fn parse_sales_csv(csv_text: &str) -> Result<Vec<SalesRecord>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !index.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing));
    }

    let date_col = index["date"];
    let name_col = index["product_name"];
    let quantity_col = index["quantity_sold"];
    let price_col = index["price"];
    let revenue_col = index["revenue"];

    let mut records = Vec::new();
    let mut dropped = 0_usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };

        let Some(date) = parse_date(row.get(date_col).unwrap_or("")) else {
            dropped += 1;
            continue;
        };
        let product_name = row.get(name_col).unwrap_or("").trim();
        if product_name.is_empty() {
            dropped += 1;
            continue;
        }

        records.push(SalesRecord {
            date,
            product_name: product_name.to_string(),
            // Quantities are non-negative by the data model.
            quantity_sold: parse_number(row.get(quantity_col).unwrap_or("")).max(0.0),
            price: parse_number(row.get(price_col).unwrap_or("")),
            revenue: parse_number(row.get(revenue_col).unwrap_or("")),
        });
    }

    if dropped > 0 {
        warn!("Dropped {} unusable rows during CSV import", dropped);
    }

    Ok(records)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

fn parse_number(raw: &str) -> f64 {
    let cleaned = raw.replace('$', "").replace('₹', "").replace(',', "");
    cleaned.trim().parse().unwrap_or(0.0)
}
