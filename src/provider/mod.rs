//! Market data provider module
//!
//! The [`MarketData`] trait abstracts the kline source so the search,
//! screener and monitor can run against a fake feed in tests. The one
//! real implementation is [`EastmoneyClient`].

pub mod eastmoney;
pub mod error;

pub use eastmoney::*;
pub use error::*;

use crate::data::{BarSeries, MinuteBar};
use anyhow::bail;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Asia::Shanghai;
use serde::{Deserialize, Serialize};

/// One row of the exchange listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedStock {
    pub code: String,
    pub name: String,
    /// Missing while a stock is suspended
    pub latest_price: Option<f64>,
}

/// Source of daily and intraday klines
#[async_trait]
pub trait MarketData {
    /// Daily bars for `symbol` between `start` and `end`, oldest first
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, ProviderError>;

    /// Today's intraday bars for `symbol` at the given minute resolution
    async fn minute_history(
        &self,
        symbol: &str,
        period_minutes: u32,
    ) -> Result<Vec<MinuteBar>, ProviderError>;

    /// All stocks listed on the STAR Market
    async fn star_listing(&self) -> Result<Vec<ListedStock>, ProviderError>;
}

/// Fetch the trailing `days` trading days for `symbol`
///
/// Trading calendars have gaps, so the request spans 1.5x the wanted
/// bars in calendar days (ending on today's Beijing date) and the result
/// is trimmed back to the last `days` bars.
pub async fn recent_daily_history(
    provider: &impl MarketData,
    symbol: &str,
    days: usize,
) -> crate::Result<BarSeries> {
    let end = Utc::now().with_timezone(&Shanghai).date_naive();
    let span = (days as i64) * 3 / 2;
    let start = end - Duration::days(span);

    let series = provider.daily_history(symbol, start, end).await?;
    series.validate()?;
    let series = series.tail(days);
    if series.is_empty() {
        bail!("no trading history for {symbol} since {start}");
    }
    Ok(series)
}
