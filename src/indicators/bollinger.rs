//! Bollinger band bandwidth indicator

use crate::indicators::Indicator;
use ta::indicators::BollingerBands as TaBollingerBands;
use ta::Next;

/// Relative band width, `(upper - lower) / middle`
///
/// Low readings mark quiet price action, which is what the screener
/// ranks stocks by.
#[derive(Debug)]
pub struct BollingerBandwidth {
    inner: TaBollingerBands,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl BollingerBandwidth {
    /// Create new bandwidth indicator
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            inner: TaBollingerBands::new(period, std_dev).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }
}

impl Indicator for BollingerBandwidth {
    fn name(&self) -> &str {
        "BollingerBandwidth"
    }

    fn update(&mut self, value: f64) {
        let output = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some((output.upper - output.lower) / output.average);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Average bandwidth over the trailing `window` bars
///
/// Returns `None` when fewer than `window` bandwidth readings exist or
/// the average is not finite (possible when the middle band is zero).
pub fn average_bandwidth(closes: &[f64], period: usize, std_dev: f64, window: usize) -> Option<f64> {
    let mut indicator = BollingerBandwidth::new(period, std_dev);
    let mut readings = Vec::new();

    for &close in closes {
        indicator.update(close);
        if let Some(value) = indicator.value() {
            readings.push(value);
        }
    }

    if readings.len() < window || window == 0 {
        return None;
    }
    let tail = &readings[readings.len() - window..];
    let mean = tail.iter().sum::<f64>() / window as f64;
    mean.is_finite().then_some(mean)
}
