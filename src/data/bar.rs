//! Daily OHLCV bar data structures

use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of a single stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
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

impl DailyBar {
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        turnover: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            turnover,
        }
    }
}

/// Ordered collection of daily bars, oldest first
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<DailyBar>,
}

impl BarSeries {
    /// Create new empty series
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Create from vector of bars
    pub fn from_vec(bars: Vec<DailyBar>) -> Self {
        Self { bars }
    }

    /// Add a bar
    pub fn push(&mut self, bar: DailyBar) {
        self.bars.push(bar);
    }

    /// Get number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get bar at index
    pub fn get(&self, index: usize) -> Option<&DailyBar> {
        self.bars.get(index)
    }

    /// Get last bar
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// Get all bars
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Keep only the trailing `days` bars
    pub fn tail(mut self, days: usize) -> Self {
        if self.bars.len() > days {
            self.bars.drain(..self.bars.len() - days);
        }
        self
    }

    /// Sort by date (oldest first)
    pub fn sort_by_date(&mut self) {
        self.bars.sort_by_key(|b| b.date);
    }

    /// Check the series invariant: strictly increasing dates, no duplicates
    pub fn validate(&self) -> crate::Result<()> {
        for w in self.bars.windows(2) {
            if w[1].date <= w[0].date {
                bail!("bars out of order at {}", w[1].date);
            }
        }
        Ok(())
    }
}

impl From<Vec<DailyBar>> for BarSeries {
    fn from(bars: Vec<DailyBar>) -> Self {
        Self::from_vec(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(year: i32, month: u32, day: u32, close: f64) -> DailyBar {
        DailyBar::new(
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            close,
            close + 1.0,
            close - 1.0,
            close,
            10_000.0,
            close * 10_000.0,
        )
    }

    #[test]
    fn test_closes_and_tail() {
        let series = BarSeries::from_vec(vec![
            bar(2024, 1, 2, 10.0),
            bar(2024, 1, 3, 11.0),
            bar(2024, 1, 4, 12.0),
        ]);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);

        let tail = series.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.get(0).unwrap().close, 11.0);
        assert_eq!(tail.last().unwrap().close, 12.0);
    }

    #[test]
    fn test_tail_shorter_than_request() {
        let series = BarSeries::from_vec(vec![bar(2024, 1, 2, 10.0)]);
        assert_eq!(series.tail(90).len(), 1);
    }

    #[test]
    fn test_validate_ordering() {
        let ordered = BarSeries::from_vec(vec![bar(2024, 1, 2, 10.0), bar(2024, 1, 3, 11.0)]);
        assert!(ordered.validate().is_ok());

        let duplicate = BarSeries::from_vec(vec![bar(2024, 1, 2, 10.0), bar(2024, 1, 2, 11.0)]);
        assert!(duplicate.validate().is_err());

        let mut backwards = BarSeries::from_vec(vec![bar(2024, 1, 3, 11.0), bar(2024, 1, 2, 10.0)]);
        assert!(backwards.validate().is_err());
        backwards.sort_by_date();
        assert!(backwards.validate().is_ok());
    }
}
