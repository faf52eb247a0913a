//! Intraday minute bar data structures

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One intraday bar at minute resolution, timestamped in exchange local time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinuteBar {
    /// Bar end time, exchange local (no timezone offset in the feed)
    pub timestamp: NaiveDateTime,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded shares
    pub volume: f64,
    /// Traded value in CNY
    pub turnover: f64,
}

impl MinuteBar {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        turnover: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            turnover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_minute_bar_fields() {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 31, 0)
            .unwrap();
        let bar = MinuteBar::new(ts, 10.0, 10.5, 9.8, 10.2, 5_000.0, 51_000.0);
        assert_eq!(bar.timestamp, ts);
        assert_eq!(bar.close, 10.2);
        assert_eq!(bar.turnover, 51_000.0);
    }
}
