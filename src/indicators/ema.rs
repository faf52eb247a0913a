//! EMA (Exponential Moving Average) indicator
//!
//! Seeded with the first input, so every sample has a value:
//! `ema[0] = x[0]`, then `ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]`
//! with `alpha = 2 / (period + 1)`.

use crate::indicators::Indicator;
use ta::indicators::ExponentialMovingAverage;
use ta::Next;

/// EMA indicator wrapper
#[derive(Debug)]
pub struct Ema {
    inner: ExponentialMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl Ema {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Self {
        Self {
            inner: ExponentialMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get EMA period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Feed one value and return the updated average
    pub fn next(&mut self, value: f64) -> f64 {
        let ema_value = self.inner.next(value);
        self.update_count += 1;
        self.last_value = Some(ema_value);
        ema_value
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.next(value);
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= 1
    }
}

/// Calculate EMA over a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let mut ema = Ema::new(period);
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        results.push(ema.next(value));
    }

    results
}
