//! Screener configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Criteria for the low-bandwidth STAR Market screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Latest close must be strictly below this, in CNY
    pub price_cap: f64,
    /// Bollinger Bands period
    pub band_period: usize,
    /// Bollinger Bands standard deviation multiplier
    pub band_std_dev: f64,
    /// Trailing days averaged for the bandwidth score
    pub bandwidth_window: usize,
    /// Number of leaderboard slots
    pub top_k: usize,
    /// Minimum daily bars a stock needs to be scored
    pub min_history: usize,
    /// First day of history fetched per stock
    pub history_start: NaiveDate,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            price_cap: 50.0,
            band_period: 20,
            band_std_dev: 2.0,
            bandwidth_window: 20,
            top_k: 5,
            min_history: 60,
            history_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }
}
