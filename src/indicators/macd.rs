//! MACD (Moving Average Convergence Divergence) indicator
//!
//! Built from three [`Ema`](crate::indicators::Ema) instances rather than
//! the `ta` MACD type so the line is defined from the very first bar,
//! matching the seeded EMA recurrence.

use crate::indicators::ema::{calculate_ema, Ema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parameter triple for the MACD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    /// A triple only makes sense when the slow period exceeds the fast one
    pub fn is_valid(&self) -> bool {
        self.fast >= 1 && self.signal >= 1 && self.slow > self.fast
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl fmt::Display for MacdParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MACD({},{},{})", self.fast, self.slow, self.signal)
    }
}

/// MACD values at a single bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// MACD lines computed over a full close series
#[derive(Debug, Clone)]
pub struct MacdSeries {
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    points: Vec<MacdPoint>,
}

impl MacdSeries {
    /// Get number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get point at index
    pub fn point(&self, index: usize) -> Option<&MacdPoint> {
        self.points.get(index)
    }

    /// Get all points
    pub fn points(&self) -> &[MacdPoint] {
        &self.points
    }

    /// Get the fast EMA line
    pub fn ema_fast(&self) -> &[f64] {
        &self.ema_fast
    }

    /// Get the slow EMA line
    pub fn ema_slow(&self) -> &[f64] {
        &self.ema_slow
    }
}

/// Compute MACD lines for a close series
///
/// Output has one point per input close. The MACD line is
/// `ema(fast) - ema(slow)`, the signal line is an EMA of the MACD line,
/// and the histogram is their difference. Degenerate triples (for example
/// `slow <= fast`) still produce a fully defined series.
pub fn compute_macd(closes: &[f64], params: MacdParams) -> MacdSeries {
    let ema_fast = calculate_ema(closes, params.fast);
    let ema_slow = calculate_ema(closes, params.slow);
    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal_line = calculate_ema(&macd_line, params.signal);

    let points = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&macd, &signal)| MacdPoint {
            macd_line: macd,
            signal_line: signal,
            histogram: macd - signal,
        })
        .collect();

    MacdSeries {
        ema_fast,
        ema_slow,
        points,
    }
}

/// Streaming MACD state for bar-by-bar updates
#[derive(Debug)]
pub struct MacdState {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl MacdState {
    pub fn new(params: MacdParams) -> Self {
        Self {
            fast: Ema::new(params.fast),
            slow: Ema::new(params.slow),
            signal: Ema::new(params.signal),
        }
    }

    /// Feed one close and return the updated MACD point
    pub fn next(&mut self, close: f64) -> MacdPoint {
        let macd = self.fast.next(close) - self.slow.next(close);
        let signal = self.signal.next(macd);
        MacdPoint {
            macd_line: macd,
            signal_line: signal,
            histogram: macd - signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_length_matches_closes() {
        let closes = vec![10.0, 11.0, 12.0, 11.5, 11.0];
        let series = compute_macd(&closes, MacdParams::default());
        assert_eq!(series.len(), closes.len());
        assert_eq!(series.ema_fast().len(), closes.len());
        assert_eq!(series.ema_slow().len(), closes.len());
    }

    #[test]
    fn test_macd_is_fast_minus_slow() {
        let closes = vec![10.0, 12.0, 9.0, 14.0, 13.0, 15.0];
        let series = compute_macd(&closes, MacdParams::new(2, 4, 3));
        for i in 0..series.len() {
            let point = series.point(i).unwrap();
            let diff = series.ema_fast()[i] - series.ema_slow()[i];
            assert!((point.macd_line - diff).abs() < 1e-12);
            assert!((point.histogram - (point.macd_line - point.signal_line)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_first_point_is_zero() {
        // both EMAs seed with the first close, so the first MACD is 0
        let series = compute_macd(&[42.0, 43.0], MacdParams::new(2, 4, 3));
        let first = series.point(0).unwrap();
        assert_eq!(first.macd_line, 0.0);
        assert_eq!(first.signal_line, 0.0);
        assert_eq!(first.histogram, 0.0);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let closes = vec![10.0, 10.0, 10.0, 12.0, 14.0, 13.0, 11.0, 10.0];
        let params = MacdParams::new(2, 4, 3);
        let batch = compute_macd(&closes, params);
        let mut state = MacdState::new(params);
        for (i, &close) in closes.iter().enumerate() {
            let point = state.next(close);
            let expected = batch.point(i).unwrap();
            assert!((point.macd_line - expected.macd_line).abs() < 1e-12);
            assert!((point.signal_line - expected.signal_line).abs() < 1e-12);
        }
    }

    #[test]
    fn test_params_validity() {
        assert!(MacdParams::new(5, 20, 5).is_valid());
        assert!(!MacdParams::new(20, 20, 5).is_valid());
        assert!(!MacdParams::new(20, 8, 5).is_valid());
        assert!(!MacdParams::new(0, 20, 5).is_valid());
        assert_eq!(MacdParams::default(), MacdParams::new(12, 26, 9));
        assert_eq!(MacdParams::new(5, 20, 7).to_string(), "MACD(5,20,7)");
    }
}
