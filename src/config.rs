/// Policy parameters for the forecasting and recommendation pipeline.
///
/// Defaults are the production constants; each can be overridden through an
/// environment variable for deployment tuning without a rebuild.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Products with fewer distinct sale-days than this are skipped entirely.
    pub min_sale_days: usize,
    /// Series at least this long use the trend-adjusted model instead of the
    /// plain moving average.
    pub trend_model_min_days: usize,
    /// Multiplier on the trailing standard deviation when building the
    /// uncertainty band for series with at least 7 days of history.
    pub band_stdev_mult: f64,
    /// Relative band width applied when history is too thin to estimate
    /// volatility (< 7 days).
    pub thin_band_frac: f64,
    /// History length at which the data-volume confidence penalty reaches 0.
    pub volume_baseline_days: usize,
    /// Confidence points deducted per day of history below the baseline.
    pub volume_penalty_per_day: f64,
    /// Confidence is never reported below this value for non-empty series.
    pub confidence_floor: f64,
    /// Safety-stock fraction added on top of forecast demand when reordering.
    pub safety_stock: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sale_days: 14,
            trend_model_min_days: 30,
            band_stdev_mult: 1.5,
            thin_band_frac: 0.3,
            volume_baseline_days: 14,
            volume_penalty_per_day: 3.0,
            confidence_floor: 30.0,
            safety_stock: 0.2,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_sale_days: env_or("MIN_SALE_DAYS", defaults.min_sale_days),
            trend_model_min_days: env_or("TREND_MODEL_MIN_DAYS", defaults.trend_model_min_days),
            band_stdev_mult: env_or("BAND_STDEV_MULT", defaults.band_stdev_mult),
            thin_band_frac: env_or("THIN_BAND_FRAC", defaults.thin_band_frac),
            volume_baseline_days: env_or("VOLUME_BASELINE_DAYS", defaults.volume_baseline_days),
            volume_penalty_per_day: env_or("VOLUME_PENALTY_PER_DAY", defaults.volume_penalty_per_day),
            confidence_floor: env_or("CONFIDENCE_FLOOR", defaults.confidence_floor),
            safety_stock: env_or("SAFETY_STOCK", defaults.safety_stock),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
