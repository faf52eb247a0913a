//! MACD line crossover detection

use crate::indicators::{MacdParams, MacdPoint, MacdState};

/// Direction of a MACD/signal line cross
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossSignal {
    /// MACD line crossed above the signal line (golden cross)
    Bullish,
    /// MACD line crossed below the signal line (death cross)
    Bearish,
}

/// True when the MACD line crosses above the signal line at `current`
///
/// The previous bar must sit at or below the signal line, so a bar that
/// touches the line and then breaks out still counts.
pub fn bullish_crossover(prev: &MacdPoint, current: &MacdPoint) -> bool {
    current.macd_line > current.signal_line && prev.macd_line <= prev.signal_line
}

/// True when the MACD line crosses below the signal line at `current`
pub fn bearish_crossover(prev: &MacdPoint, current: &MacdPoint) -> bool {
    current.macd_line < current.signal_line && prev.macd_line >= prev.signal_line
}

/// Classify the transition between two consecutive MACD points
pub fn detect(prev: &MacdPoint, current: &MacdPoint) -> Option<CrossSignal> {
    if bullish_crossover(prev, current) {
        Some(CrossSignal::Bullish)
    } else if bearish_crossover(prev, current) {
        Some(CrossSignal::Bearish)
    } else {
        None
    }
}

/// Streaming crossover detector
///
/// Feeds closes into a [`MacdState`] and reports a signal whenever two
/// consecutive points straddle the signal line. The first close can
/// never produce a signal.
#[derive(Debug)]
pub struct CrossoverTracker {
    state: MacdState,
    last: Option<MacdPoint>,
}

impl CrossoverTracker {
    pub fn new(params: MacdParams) -> Self {
        Self {
            state: MacdState::new(params),
            last: None,
        }
    }

    /// Feed one close, returning a signal if this bar completes a cross
    pub fn update(&mut self, close: f64) -> Option<CrossSignal> {
        let point = self.state.next(close);
        let signal = self.last.as_ref().and_then(|prev| detect(prev, &point));
        self.last = Some(point);
        signal
    }
}
