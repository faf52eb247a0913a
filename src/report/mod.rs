//! Markdown report rendering
//!
//! Each report is an askama template over preformatted string fields,
//! so the number formatting lives with the Rust code rather than in
//! the template files.

use crate::backtest::{BacktestOutcome, SearchOutcome};
use crate::config::ScreenerConfig;
use crate::data::{BarSeries, MinuteBar};
use crate::screener::ScreenReport;
use anyhow::Context;
use askama::Template;
use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Shanghai;
use std::fs;
use std::path::{Path, PathBuf};

fn timestamp() -> String {
    Utc::now()
        .with_timezone(&Shanghai)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}

/// One rendered trade table row
pub struct TradeRow {
    pub buy_date: String,
    pub buy_price: String,
    pub sell_date: String,
    pub sell_price: String,
    pub profit: String,
    pub result: String,
}

/// Parameter search report
#[derive(Template)]
#[template(path = "search_report.md", escape = "none")]
pub struct SearchReportTemplate {
    pub stock_code: String,
    pub window_days: usize,
    pub generated_at: String,
    pub evaluated: usize,
    pub found: bool,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub rate_percent: String,
    pub threshold_note: String,
    pub successful: usize,
    pub total: usize,
    pub has_trades: bool,
    pub trades: Vec<TradeRow>,
}

impl SearchReportTemplate {
    pub fn new(
        stock_code: &str,
        window_days: usize,
        outcome: &SearchOutcome,
        detail: Option<&BacktestOutcome>,
        threshold: f64,
    ) -> Self {
        let threshold_note = if outcome.best_rate >= threshold {
            format!(
                "The search stopped early once the win rate reached {:.0}%.",
                threshold * 100.0
            )
        } else {
            format!(
                "The full grid was scanned; no triple reached {:.0}%.",
                threshold * 100.0
            )
        };

        let trades: Vec<TradeRow> = detail
            .map(|d| {
                d.trades
                    .iter()
                    .map(|t| TradeRow {
                        buy_date: t.buy_date.to_string(),
                        buy_price: format!("{:.2}", t.buy_price),
                        sell_date: t.sell_date.to_string(),
                        sell_price: format!("{:.2}", t.sell_price),
                        profit: format!("{:+.2}", t.profit),
                        result: if t.is_win() { "win" } else { "loss" }.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (fast, slow, signal) = outcome
            .best_params
            .map(|p| (p.fast, p.slow, p.signal))
            .unwrap_or((0, 0, 0));

        Self {
            stock_code: stock_code.to_string(),
            window_days,
            generated_at: timestamp(),
            evaluated: outcome.evaluated,
            found: outcome.best_params.is_some(),
            fast,
            slow,
            signal,
            rate_percent: format!("{:.2}%", outcome.best_rate * 100.0),
            threshold_note,
            successful: detail.map(|d| d.successful_count).unwrap_or(0),
            total: detail.map(|d| d.total_count).unwrap_or(0),
            has_trades: !trades.is_empty(),
            trades,
        }
    }
}

/// One rendered screener leaderboard row
pub struct ScreenRow {
    pub code: String,
    pub name: String,
    pub price: String,
    pub bandwidth: String,
    pub volume: String,
}

/// One rendered screener failure row
pub struct FailureRow {
    pub code: String,
    pub name: String,
    pub error: String,
}

/// Screener run report
#[derive(Template)]
#[template(path = "screener_report.md", escape = "none")]
pub struct ScreenerReportTemplate {
    pub generated_at: String,
    pub price_cap: String,
    pub top_k: usize,
    pub has_winners: bool,
    pub winners: Vec<ScreenRow>,
    pub scanned: usize,
    pub skipped_price: usize,
    pub skipped_history: usize,
    pub failure_count: usize,
    pub has_failures: bool,
    pub failures: Vec<FailureRow>,
}

impl ScreenerReportTemplate {
    pub fn new(config: &ScreenerConfig, report: &ScreenReport) -> Self {
        let winners: Vec<ScreenRow> = report
            .winners
            .iter()
            .map(|w| ScreenRow {
                code: w.code.clone(),
                name: w.name.clone(),
                price: format!("{:.2}", w.latest_price),
                bandwidth: format!("{:.4}", w.avg_bandwidth),
                volume: format!("{:.0}", w.avg_volume),
            })
            .collect();
        let failures: Vec<FailureRow> = report
            .failures
            .iter()
            .map(|f| FailureRow {
                code: f.code.clone(),
                name: f.name.clone(),
                error: f.error.clone(),
            })
            .collect();

        Self {
            generated_at: timestamp(),
            price_cap: format!("{:.2}", config.price_cap),
            top_k: config.top_k,
            has_winners: !winners.is_empty(),
            winners,
            scanned: report.scanned,
            skipped_price: report.skipped_price,
            skipped_history: report.skipped_history,
            failure_count: report.failures.len(),
            has_failures: !failures.is_empty(),
            failures,
        }
    }
}

/// One rendered bar row, daily or intraday
pub struct BarRow {
    pub date: String,
    pub time: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub turnover: String,
}

/// Single-stock daily plus intraday snapshot
#[derive(Template)]
#[template(path = "snapshot.md", escape = "none")]
pub struct SnapshotTemplate {
    pub stock_code: String,
    pub date: String,
    pub generated_at: String,
    pub has_daily: bool,
    pub daily_count: usize,
    pub daily_rows: Vec<BarRow>,
    pub has_minutes: bool,
    pub minute_rows: Vec<BarRow>,
}

impl SnapshotTemplate {
    pub fn new(
        stock_code: &str,
        date: NaiveDate,
        daily: &BarSeries,
        minutes: &[MinuteBar],
    ) -> Self {
        let daily_rows: Vec<BarRow> = daily
            .bars()
            .iter()
            .map(|b| BarRow {
                date: b.date.to_string(),
                time: String::new(),
                open: format!("{:.2}", b.open),
                high: format!("{:.2}", b.high),
                low: format!("{:.2}", b.low),
                close: format!("{:.2}", b.close),
                volume: format!("{:.0}", b.volume),
                turnover: format!("{:.0}", b.turnover),
            })
            .collect();
        let minute_rows: Vec<BarRow> = minutes
            .iter()
            .map(|b| BarRow {
                date: String::new(),
                time: b.timestamp.format("%H:%M").to_string(),
                open: format!("{:.2}", b.open),
                high: format!("{:.2}", b.high),
                low: format!("{:.2}", b.low),
                close: format!("{:.2}", b.close),
                volume: format!("{:.0}", b.volume),
                turnover: format!("{:.0}", b.turnover),
            })
            .collect();

        Self {
            stock_code: stock_code.to_string(),
            date: date.to_string(),
            generated_at: timestamp(),
            has_daily: !daily_rows.is_empty(),
            daily_count: daily_rows.len(),
            daily_rows,
            has_minutes: !minute_rows.is_empty(),
            minute_rows,
        }
    }
}

/// Dump a bar series in the feed's own column order
pub fn bars_to_csv(series: &BarSeries) -> String {
    let mut out = String::from("date,open,close,high,low,volume,turnover\n");
    for bar in series.bars() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            bar.date, bar.open, bar.close, bar.high, bar.low, bar.volume, bar.turnover
        ));
    }
    out
}

/// Write a rendered report under the output directory
pub fn write_output(dir: &str, filename: &str, content: &str) -> crate::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {dir}"))?;
    let path = Path::new(dir).join(filename);
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::Trade;
    use crate::indicators::MacdParams;

    #[test]
    fn test_search_report_with_winner() {
        let outcome = SearchOutcome {
            best_params: Some(MacdParams::new(5, 20, 7)),
            best_rate: 0.875,
            evaluated: 42,
        };
        let detail = BacktestOutcome::from_trades(vec![
            Trade {
                buy_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                buy_price: 12.0,
                sell_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
                sell_price: 13.5,
                profit: 1.5,
            },
            Trade {
                buy_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                buy_price: 14.0,
                sell_date: NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(),
                sell_price: 13.0,
                profit: -1.0,
            },
        ]);

        let report = SearchReportTemplate::new("688027", 90, &outcome, Some(&detail), 0.85)
            .render()
            .unwrap();
        assert!(report.contains("# MACD Parameter Search: 688027"));
        assert!(report.contains("| 5 | 20 | 7 | 87.50% |"));
        assert!(report.contains("stopped early"));
        assert!(report.contains("1 of 2 profitable"));
        assert!(report.contains("| 1 | 2024-03-01 | 12.00 | 2024-03-08 | 13.50 | +1.50 | win |"));
        assert!(report.contains("| 2 | 2024-04-02 | 14.00 | 2024-04-09 | 13.00 | -1.00 | loss |"));
    }

    #[test]
    fn test_search_report_without_winner() {
        let outcome = SearchOutcome {
            best_params: None,
            best_rate: 0.0,
            evaluated: 180,
        };
        let report = SearchReportTemplate::new("688027", 90, &outcome, None, 0.85)
            .render()
            .unwrap();
        assert!(report.contains("No parameter combination won a single trade"));
        assert!(!report.contains("## Best parameters"));
    }

    #[test]
    fn test_screener_report_lists_winners_and_failures() {
        use crate::screener::{ScreenCandidate, ScreenFailure};

        let report = ScreenReport {
            winners: vec![ScreenCandidate {
                code: "688001".to_string(),
                name: "华兴源创".to_string(),
                latest_price: 23.45,
                avg_bandwidth: 0.0712,
                avg_volume: 3_456_789.0,
            }],
            scanned: 500,
            skipped_price: 120,
            skipped_history: 30,
            failures: vec![ScreenFailure {
                code: "688099".to_string(),
                name: "晶晨股份".to_string(),
                error: "no data returned for 688099".to_string(),
            }],
        };
        let rendered = ScreenerReportTemplate::new(&ScreenerConfig::default(), &report)
            .render()
            .unwrap();
        assert!(rendered.contains("| 1 | 688001 | 华兴源创 | 23.45 | 0.0712 | 3456789 |"));
        assert!(rendered.contains("Listings scanned: 500"));
        assert!(rendered.contains("| 688099 | 晶晨股份 | no data returned for 688099 |"));
    }

    #[test]
    fn test_snapshot_renders_daily_and_minute_tables() {
        use crate::data::{DailyBar, MinuteBar};

        let mut daily = BarSeries::new();
        daily.push(DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            10.5,
            11.0,
            10.4,
            10.8,
            123456.0,
            1_330_000.0,
        ));
        let minutes = vec![MinuteBar::new(
            NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 35, 0)
                .unwrap(),
            10.5,
            10.6,
            10.4,
            10.55,
            800.0,
            8_440.0,
        )];

        let rendered = SnapshotTemplate::new(
            "688027",
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            &daily,
            &minutes,
        )
        .render()
        .unwrap();
        assert!(rendered.contains("# 688027 Snapshot: 2024-06-03"));
        assert!(rendered.contains("| 2024-06-03 | 10.50 | 11.00 | 10.40 | 10.80 | 123456 | 1330000 |"));
        assert!(rendered.contains("| 09:35 | 10.50 | 10.60 | 10.40 | 10.55 | 800 | 8440 |"));
    }

    #[test]
    fn test_csv_matches_feed_column_order() {
        use crate::data::DailyBar;

        let mut series = BarSeries::new();
        series.push(DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            10.5,
            11.0,
            10.4,
            10.8,
            123456.0,
            1330000.5,
        ));
        let csv = bars_to_csv(&series);
        assert_eq!(
            csv,
            "date,open,close,high,low,volume,turnover\n2024-06-03,10.5,10.8,11,10.4,123456,1330000.5\n"
        );
    }
}
