//! East Money push2 kline client
//!
//! Talks to the public quote endpoints behind the eastmoney.com charts.
//! Klines arrive as comma-joined strings
//! (`date,open,close,high,low,volume,turnover` in feed order), one per
//! bar, and are decoded into typed bars here.

use crate::data::{BarSeries, DailyBar, MinuteBar};
use crate::provider::{ListedStock, MarketData, ProviderError};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

/// Default kline host
pub const DEFAULT_BASE_URL: &str = "https://push2his.eastmoney.com";

/// Listing host differs from the kline one
const LISTING_URL: &str = "https://push2.eastmoney.com/api/qt/clist/get";

/// Public token the chart frontend sends with every request
const UT_TOKEN: &str = "7eea3edcaed734bea9cbfc24409ed989";

/// STAR Market filter for the listing endpoint
const STAR_MARKET_FILTER: &str = "m:1+t:23";

/// Client for the East Money push2 quote API
#[derive(Debug, Clone)]
pub struct EastmoneyClient {
    pub base_url: String,
}

impl EastmoneyClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    async fn fetch_klines(
        &self,
        symbol: &str,
        klt: &str,
        beg: &str,
        end: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let secid = secid(symbol);
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/api/qt/stock/kline/get", self.base_url))
            .query(&[
                ("fields1", "f1,f2,f3,f4,f5,f6"),
                ("fields2", "f51,f52,f53,f54,f55,f56,f57"),
                ("ut", UT_TOKEN),
                ("klt", klt),
                ("fqt", "1"),
                ("secid", secid.as_str()),
                ("beg", beg),
                ("end", end),
            ])
            .send()
            .await?;

        let body: KlineResponse = response.json().await?;
        let payload = body.data.ok_or_else(|| ProviderError::NoData {
            symbol: symbol.to_string(),
        })?;
        debug!(
            "received {} klines for {} ({})",
            payload.klines.len(),
            payload.name,
            payload.code
        );
        Ok(payload.klines)
    }
}

impl Default for EastmoneyClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}

#[async_trait]
impl MarketData for EastmoneyClient {
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, ProviderError> {
        let klines = self
            .fetch_klines(
                symbol,
                "101",
                &start.format("%Y%m%d").to_string(),
                &end.format("%Y%m%d").to_string(),
            )
            .await?;

        let mut series = BarSeries::new();
        for line in &klines {
            series.push(parse_daily_kline(line)?);
        }
        Ok(series)
    }

    async fn minute_history(
        &self,
        symbol: &str,
        period_minutes: u32,
    ) -> Result<Vec<MinuteBar>, ProviderError> {
        let klines = self
            .fetch_klines(symbol, &period_minutes.to_string(), "0", "20500101")
            .await?;

        klines.iter().map(|line| parse_minute_kline(line)).collect()
    }

    async fn star_listing(&self) -> Result<Vec<ListedStock>, ProviderError> {
        let client = reqwest::Client::new();
        let response = client
            .get(LISTING_URL)
            .query(&[
                ("pn", "1"),
                ("pz", "5000"),
                ("po", "1"),
                ("np", "1"),
                ("fltt", "2"),
                ("invt", "2"),
                ("fid", "f12"),
                ("fs", STAR_MARKET_FILTER),
                ("fields", "f2,f12,f14"),
            ])
            .send()
            .await?;

        let body: ListingResponse = response.json().await?;
        let payload = body
            .data
            .ok_or_else(|| ProviderError::Malformed("listing payload missing".to_string()))?;
        debug!("listing returned {} stocks", payload.diff.len());

        Ok(payload
            .diff
            .into_iter()
            .map(|item| ListedStock {
                code: item.code,
                name: item.name,
                latest_price: item.latest_price,
            })
            .collect())
    }
}

/// Exchange prefix for a secid: Shanghai codes start with 6
fn secid(symbol: &str) -> String {
    if symbol.starts_with('6') {
        format!("1.{symbol}")
    } else {
        format!("0.{symbol}")
    }
}

fn parse_daily_kline(line: &str) -> Result<DailyBar, ProviderError> {
    let fields = split_kline(line)?;
    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
        .map_err(|e| ProviderError::Malformed(format!("bad date in `{line}`: {e}")))?;
    Ok(DailyBar {
        date,
        open: parse_field(fields[1], line)?,
        close: parse_field(fields[2], line)?,
        high: parse_field(fields[3], line)?,
        low: parse_field(fields[4], line)?,
        volume: parse_field(fields[5], line)?,
        turnover: parse_field(fields[6], line)?,
    })
}

fn parse_minute_kline(line: &str) -> Result<MinuteBar, ProviderError> {
    let fields = split_kline(line)?;
    let timestamp = NaiveDateTime::parse_from_str(fields[0], "%Y-%m-%d %H:%M")
        .map_err(|e| ProviderError::Malformed(format!("bad timestamp in `{line}`: {e}")))?;
    Ok(MinuteBar {
        timestamp,
        open: parse_field(fields[1], line)?,
        close: parse_field(fields[2], line)?,
        high: parse_field(fields[3], line)?,
        low: parse_field(fields[4], line)?,
        volume: parse_field(fields[5], line)?,
        turnover: parse_field(fields[6], line)?,
    })
}

fn split_kline(line: &str) -> Result<Vec<&str>, ProviderError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 7 {
        return Err(ProviderError::Malformed(format!(
            "kline `{line}` has {} fields, expected 7",
            fields.len()
        )));
    }
    Ok(fields)
}

fn parse_field(field: &str, line: &str) -> Result<f64, ProviderError> {
    field
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("bad number `{field}` in `{line}`")))
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlinePayload>,
}

#[derive(Debug, Deserialize)]
struct KlinePayload {
    code: String,
    name: String,
    klines: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: Option<ListingPayload>,
}

#[derive(Debug, Deserialize)]
struct ListingPayload {
    diff: Vec<ListingItem>,
}

#[derive(Debug, Deserialize)]
struct ListingItem {
    #[serde(rename = "f12")]
    code: String,
    #[serde(rename = "f14")]
    name: String,
    /// `f2` is a number normally but a placeholder string while suspended
    #[serde(rename = "f2", default, deserialize_with = "lenient_f64")]
    latest_price: Option<f64>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_daily_kline() {
        let bar = parse_daily_kline("2024-06-03,10.50,10.80,11.00,10.40,123456,1330000.5").unwrap();
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(bar.open, 10.50);
        assert_eq!(bar.close, 10.80);
        assert_eq!(bar.high, 11.00);
        assert_eq!(bar.low, 10.40);
        assert_eq!(bar.volume, 123456.0);
        assert_eq!(bar.turnover, 1_330_000.5);
    }

    #[test]
    fn test_parse_minute_kline() {
        let bar = parse_minute_kline("2024-06-03 09:31,10.50,10.52,10.55,10.49,800,8412.0").unwrap();
        assert_eq!(
            bar.timestamp,
            NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 31, 0)
                .unwrap()
        );
        assert_eq!(bar.close, 10.52);
    }

    #[test]
    fn test_parse_rejects_short_and_garbled_lines() {
        assert!(parse_daily_kline("2024-06-03,10.50,10.80").is_err());
        assert!(parse_daily_kline("notadate,1,2,3,4,5,6").is_err());
        assert!(parse_daily_kline("2024-06-03,one,2,3,4,5,6").is_err());
    }

    #[test]
    fn test_secid_prefixes() {
        assert_eq!(secid("688027"), "1.688027");
        assert_eq!(secid("600519"), "1.600519");
        assert_eq!(secid("000001"), "0.000001");
        assert_eq!(secid("300750"), "0.300750");
    }

    #[test]
    fn test_listing_item_tolerates_suspended_price() {
        let item: ListingItem =
            serde_json::from_str(r#"{"f12":"688027","f14":"国盾量子","f2":"-"}"#).unwrap();
        assert_eq!(item.code, "688027");
        assert_eq!(item.latest_price, None);

        let item: ListingItem =
            serde_json::from_str(r#"{"f12":"688027","f14":"国盾量子","f2":102.5}"#).unwrap();
        assert_eq!(item.latest_price, Some(102.5));
    }
}
