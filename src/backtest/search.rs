//! MACD parameter grid search

use crate::backtest::simulator::{simulate, BacktestOutcome};
use crate::config::SearchConfig;
use crate::data::BarSeries;
use crate::indicators::{compute_macd, MacdParams};
use serde::Serialize;
use tracing::{debug, info};

/// Scores one parameter triple against a bar history
pub trait Evaluator {
    fn evaluate(&mut self, bars: &BarSeries, params: MacdParams) -> BacktestOutcome;
}

/// Evaluator backed by the crossover trade simulation
#[derive(Debug, Default)]
pub struct MacdEvaluator;

impl Evaluator for MacdEvaluator {
    fn evaluate(&mut self, bars: &BarSeries, params: MacdParams) -> BacktestOutcome {
        let series = compute_macd(&bars.closes(), params);
        simulate(&series, bars)
    }
}

/// Result of a grid search
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    /// Best triple found, `None` when nothing beat a zero win rate
    pub best_params: Option<MacdParams>,
    pub best_rate: f64,
    /// Triples actually scored (invalid ones are skipped before scoring)
    pub evaluated: usize,
}

/// Search the configured grid with the standard MACD evaluator
pub fn search(bars: &BarSeries, config: &SearchConfig) -> SearchOutcome {
    search_with(bars, config, &mut MacdEvaluator)
}

/// Search the configured grid with a caller-supplied evaluator
///
/// Triples are visited fast-outer, slow-middle, signal-inner, each axis
/// in config order. A candidate replaces the incumbent only on a strictly
/// better rate, so the first of equals wins. The scan stops as soon as
/// the best rate reaches the success threshold.
pub fn search_with<E: Evaluator>(
    bars: &BarSeries,
    config: &SearchConfig,
    evaluator: &mut E,
) -> SearchOutcome {
    info!(
        "searching {} parameter combinations over {} bars",
        config.combinations(),
        bars.len()
    );

    let mut outcome = SearchOutcome::default();

    'grid: for &fast in &config.fast_periods {
        for &slow in &config.slow_periods {
            if slow <= fast {
                continue;
            }
            for &signal in &config.signal_periods {
                let params = MacdParams::new(fast, slow, signal);
                let result = evaluator.evaluate(bars, params);
                outcome.evaluated += 1;
                debug!(
                    "{} win rate {:.4} over {} trades",
                    params, result.success_rate, result.total_count
                );

                if result.success_rate > outcome.best_rate {
                    outcome.best_params = Some(params);
                    outcome.best_rate = result.success_rate;
                    if outcome.best_rate >= config.success_threshold {
                        info!(
                            "{} reached {:.2}% win rate, stopping early after {} evaluations",
                            params,
                            outcome.best_rate * 100.0,
                            outcome.evaluated
                        );
                        break 'grid;
                    }
                }
            }
        }
    }

    match outcome.best_params {
        Some(params) => info!(
            "best parameters {} with {:.2}% win rate ({} triples scored)",
            params,
            outcome.best_rate * 100.0,
            outcome.evaluated
        ),
        None => info!(
            "no parameter combination won a single trade ({} triples scored)",
            outcome.evaluated
        ),
    }

    outcome
}
