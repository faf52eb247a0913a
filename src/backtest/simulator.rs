//! Single-position crossover trade simulator

use crate::data::BarSeries;
use crate::indicators::MacdSeries;
use crate::strategy::{bearish_crossover, bullish_crossover};
use chrono::NaiveDate;
use serde::Serialize;

/// One completed round trip
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub profit: f64,
}

impl Trade {
    /// A trade wins only on a strictly positive profit
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }
}

/// Aggregate result of one simulation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BacktestOutcome {
    pub success_rate: f64,
    pub successful_count: usize,
    pub total_count: usize,
    pub trades: Vec<Trade>,
}

impl BacktestOutcome {
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        let total_count = trades.len();
        let successful_count = trades.iter().filter(|t| t.is_win()).count();
        let success_rate = if total_count > 0 {
            successful_count as f64 / total_count as f64
        } else {
            0.0
        };
        Self {
            success_rate,
            successful_count,
            total_count,
            trades,
        }
    }
}

enum Position {
    Flat,
    Holding {
        buy_date: NaiveDate,
        buy_price: f64,
    },
}

/// Replay crossover trades over a bar history
///
/// Opens at the close of a bullish crossover bar and sells at the close
/// of the next bearish one. At most one position is open at a time, and
/// a position still open when the history ends is discarded rather than
/// counted. Crossovers are judged from the second bar onward.
pub fn simulate(series: &MacdSeries, bars: &BarSeries) -> BacktestOutcome {
    let n = bars.len().min(series.len());
    let points = series.points();
    let history = bars.bars();

    let mut position = Position::Flat;
    let mut trades = Vec::new();

    for i in 1..n {
        let prev = &points[i - 1];
        let current = &points[i];
        let bar = &history[i];

        match position {
            Position::Flat => {
                if bullish_crossover(prev, current) {
                    position = Position::Holding {
                        buy_date: bar.date,
                        buy_price: bar.close,
                    };
                }
            }
            Position::Holding {
                buy_date,
                buy_price,
            } => {
                if bearish_crossover(prev, current) {
                    trades.push(Trade {
                        buy_date,
                        buy_price,
                        sell_date: bar.date,
                        sell_price: bar.close,
                        profit: bar.close - buy_price,
                    });
                    position = Position::Flat;
                }
            }
        }
    }

    BacktestOutcome::from_trades(trades)
}
