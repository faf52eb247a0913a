//! Low-volatility stock screener
//!
//! Walks the whole STAR Market listing and ranks cheap stocks by how
//! tight their Bollinger bands have been lately. Quiet, coiled charts
//! float to the top.

pub mod leaderboard;

pub use leaderboard::*;

use crate::config::ScreenerConfig;
use crate::indicators::average_bandwidth;
use crate::provider::MarketData;
use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A stock that passed every filter
#[derive(Debug, Clone, Serialize)]
pub struct ScreenCandidate {
    pub code: String,
    pub name: String,
    /// Last close from the daily history
    pub latest_price: f64,
    pub avg_bandwidth: f64,
    /// Mean daily volume over the bandwidth window
    pub avg_volume: f64,
}

/// A stock the screen could not score
#[derive(Debug, Clone, Serialize)]
pub struct ScreenFailure {
    pub code: String,
    pub name: String,
    pub error: String,
}

/// Full audit of one screener run
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    /// Top candidates, tightest bandwidth first
    pub winners: Vec<ScreenCandidate>,
    pub scanned: usize,
    pub skipped_price: usize,
    pub skipped_history: usize,
    pub failures: Vec<ScreenFailure>,
}

/// Run the screen over every listed STAR Market stock
///
/// Each stock is fetched and scored one at a time; a fetch failure is
/// recorded and the scan moves on. The latest price filter reads the
/// last close of the history rather than the listing quote, so a stale
/// or suspended quote cannot sneak a stock past the cap.
pub async fn run_screen(
    provider: &impl MarketData,
    config: &ScreenerConfig,
) -> crate::Result<ScreenReport> {
    let listing = provider.star_listing().await?;
    info!("screening {} STAR Market stocks", listing.len());

    let today = Utc::now().with_timezone(&Shanghai).date_naive();
    let mut board = Leaderboard::new(config.top_k);
    let mut report = ScreenReport {
        winners: Vec::new(),
        scanned: 0,
        skipped_price: 0,
        skipped_history: 0,
        failures: Vec::new(),
    };

    for stock in &listing {
        report.scanned += 1;

        let history = match provider
            .daily_history(&stock.code, config.history_start, today)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                warn!("{} fetch failed: {e}", stock.code);
                report.failures.push(ScreenFailure {
                    code: stock.code.clone(),
                    name: stock.name.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        if history.len() < config.min_history {
            report.skipped_history += 1;
            continue;
        }

        let last = match history.last() {
            Some(bar) => bar,
            None => {
                report.skipped_history += 1;
                continue;
            }
        };
        if last.close >= config.price_cap {
            report.skipped_price += 1;
            continue;
        }

        let closes = history.closes();
        let avg_bandwidth = match average_bandwidth(
            &closes,
            config.band_period,
            config.band_std_dev,
            config.bandwidth_window,
        ) {
            Some(value) => value,
            None => {
                debug!("{} bandwidth undefined, discarded", stock.code);
                continue;
            }
        };

        let window = config.bandwidth_window.min(history.len());
        let bars = history.bars();
        let avg_volume = bars[bars.len() - window..]
            .iter()
            .map(|b| b.volume)
            .sum::<f64>()
            / window as f64;

        board.offer(ScreenCandidate {
            code: stock.code.clone(),
            name: stock.name.clone(),
            latest_price: last.close,
            avg_bandwidth,
            avg_volume,
        });
    }

    report.winners = board.into_sorted();
    info!(
        "screen finished: {} winners, {} skipped on price, {} on history, {} failures",
        report.winners.len(),
        report.skipped_price,
        report.skipped_history,
        report.failures.len()
    );
    Ok(report)
}
