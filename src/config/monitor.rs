//! Signal-monitor configuration

use serde::{Deserialize, Serialize};

/// Polling and alert thresholds for the intraday monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between polls
    pub poll_interval_secs: u64,
    /// Total seconds the monitor runs before stopping itself
    pub run_duration_secs: u64,
    /// Combined turnover over the checked window, in CNY
    pub turnover_threshold: f64,
    /// High-low spread over the checked window, in CNY
    pub fluctuation_threshold: f64,
    /// Skip polls outside exchange trading sessions
    pub session_gated: bool,
    /// Signal log filename inside the output directory
    pub log_file: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 120,
            run_duration_secs: 600,
            turnover_threshold: 230_000_000.0,
            fluctuation_threshold: 3.2,
            session_gated: true,
            log_file: "signals.md".to_string(),
        }
    }
}
