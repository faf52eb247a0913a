//! Starwatch: STAR Market stock analysis toolkit
//!
//! One library plus four binaries for analyzing Shanghai STAR Market
//! (688xxx) stocks, using:
//! - [ta-rs](https://github.com/greyblake/ta-rs) for technical analysis
//! - the East Money push2 endpoints for kline history
//!
//! # Features
//!
//! - **Indicator Engine**: EMA/MACD series aligned index-for-index with the
//!   price series, plus Bollinger bandwidth for the screener
//! - **Backtest Simulator**: strictly-alternating long-only crossover trades
//!   reduced to a success rate
//! - **Parameter Search**: grid search over (fast, slow, signal) with an
//!   early exit once a target success rate is reached
//! - **Signal Monitor**: interval-polled two-bar turnover/fluctuation alerts
//!   written to an append-only markdown log
//! - **Screeners**: king-of-the-hill selection of the lowest-bandwidth
//!   STAR Market stocks with an auditable per-stock outcome report
//!
//! # Example
//!
//! ```no_run
//! use starwatch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = EastmoneyClient::new("https://push2his.eastmoney.com".to_string());
//!     let bars = recent_daily_history(&client, "688027", 90).await?;
//!     let outcome = search(&bars, &SearchConfig::default());
//!     println!("best rate: {:.2}%", outcome.best_rate * 100.0);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod provider;
pub mod indicators;
pub mod strategy;
pub mod backtest;
pub mod screener;
pub mod monitor;
pub mod report;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::provider::*;
    pub use crate::indicators::*;
    pub use crate::strategy::*;
    pub use crate::backtest::*;
    pub use crate::screener::*;
    pub use crate::monitor::*;
    pub use crate::report::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
