pub mod anomaly_service;
pub mod csv_import_service;
pub mod forecasting_service;
pub mod insight_service;
pub mod pricing_service;
pub mod reasoning_service;
pub mod reorder_service;
pub mod report_service;
pub mod series;
pub mod stats;
