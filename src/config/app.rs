//! Process-level configuration from the environment

use dotenv::dotenv;

/// Settings shared by all binaries
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Stock code to analyze (e.g. "688027")
    pub stock_code: String,
    /// Trading days of daily history to backtest over
    pub history_days: usize,
    /// Directory for reports, logs and data dumps
    pub output_dir: String,
    /// Kline endpoint base URL
    pub provider_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(AppConfig {
            stock_code: std::env::var("STOCK_CODE").unwrap_or_else(|_| "688027".to_string()),
            history_days: std::env::var("HISTORY_DAYS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()
                .unwrap_or(90),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "out".to_string()),
            provider_base_url: std::env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://push2his.eastmoney.com".to_string()),
        })
    }
}
