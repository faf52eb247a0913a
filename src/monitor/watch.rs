//! Minute-bar burst detection and the polling monitor

use crate::config::MonitorConfig;
use crate::data::MinuteBar;
use crate::indicators::MacdParams;
use crate::monitor::session::{beijing_now, is_trading_session};
use crate::provider::MarketData;
use crate::strategy::{CrossSignal, CrossoverTracker};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, info, warn};

/// Measurements over the last two minute bars
#[derive(Debug, Clone, Copy)]
pub struct WindowCheck {
    /// Combined turnover of both bars, CNY
    pub turnover: f64,
    /// Highest high minus lowest low across the window
    pub fluctuation: f64,
    /// Last close minus first open, sign gives the move direction
    pub direction: f64,
}

/// What a triggered window means for the holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Buy,
    Sell,
}

impl WindowCheck {
    /// A window alerts only when turnover and range both clear their
    /// thresholds; a flat or falling move reads as sell pressure
    pub fn alert(&self, config: &MonitorConfig) -> Option<AlertKind> {
        if self.turnover >= config.turnover_threshold
            && self.fluctuation >= config.fluctuation_threshold
        {
            if self.direction > 0.0 {
                Some(AlertKind::Buy)
            } else {
                Some(AlertKind::Sell)
            }
        } else {
            None
        }
    }
}

/// Measure the trailing two bars, `None` when fewer exist
pub fn analyze_window(bars: &[MinuteBar]) -> Option<WindowCheck> {
    if bars.len() < 2 {
        return None;
    }
    let window = &bars[bars.len() - 2..];
    let high = window[0].high.max(window[1].high);
    let low = window[0].low.min(window[1].low);
    Some(WindowCheck {
        turnover: window[0].turnover + window[1].turnover,
        fluctuation: high - low,
        direction: window[1].close - window[0].open,
    })
}

/// Append-only markdown log of monitor alerts
#[derive(Debug)]
pub struct SignalLog {
    path: PathBuf,
}

impl SignalLog {
    /// Open the log, writing the header block if the file is new
    pub fn create(path: impl Into<PathBuf>, code: &str) -> crate::Result<Self> {
        let path = path.into();
        if !path.exists() {
            let header = format!(
                "# {code} signal watch\nstarted: {}\n\n---\n\n",
                beijing_now().format("%Y-%m-%d %H:%M:%S")
            );
            fs::write(&path, header)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn append(&self, line: &str) -> crate::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Polls one stock's minute feed for a fixed stretch of time
pub struct Monitor<P> {
    provider: P,
    code: String,
    config: MonitorConfig,
    log: SignalLog,
    tracker: CrossoverTracker,
    last_seen: Option<NaiveDateTime>,
}

impl<P: MarketData> Monitor<P> {
    pub fn new(provider: P, code: impl Into<String>, config: MonitorConfig) -> crate::Result<Self> {
        let code = code.into();
        let log = SignalLog::create(&config.log_file, &code)?;
        Ok(Self {
            provider,
            code,
            config,
            log,
            tracker: CrossoverTracker::new(MacdParams::default()),
            last_seen: None,
        })
    }

    /// Poll until the run duration has elapsed
    ///
    /// A failed poll is logged and does not stop the run. Polls outside
    /// the trading session are skipped when gating is on.
    pub async fn run(&mut self) -> crate::Result<()> {
        let started = Instant::now();
        let run_duration = Duration::from_secs(self.config.run_duration_secs);
        let mut ticker = interval(Duration::from_secs(self.config.poll_interval_secs));

        info!(
            "watching {} every {}s for {}s",
            self.code, self.config.poll_interval_secs, self.config.run_duration_secs
        );

        loop {
            ticker.tick().await;
            if started.elapsed() >= run_duration {
                info!("watch window for {} elapsed", self.code);
                break;
            }
            if self.config.session_gated && !is_trading_session(&beijing_now()) {
                debug!("outside the trading session, skipping poll");
                continue;
            }
            if let Err(e) = self.poll_once().await {
                warn!("poll for {} failed: {e:#}", self.code);
                self.log.append(&format!(
                    "error | {} | {e:#}",
                    beijing_now().format("%H:%M:%S")
                ))?;
            }
        }
        Ok(())
    }

    async fn poll_once(&mut self) -> crate::Result<()> {
        let bars = self.provider.minute_history(&self.code, 1).await?;
        let now = beijing_now().format("%H:%M:%S").to_string();

        // feed unseen closes into the crossover tracker
        for bar in &bars {
            if self.last_seen.is_some_and(|seen| bar.timestamp <= seen) {
                continue;
            }
            match self.tracker.update(bar.close) {
                Some(CrossSignal::Bullish) => {
                    info!("{} golden cross on the minute chart", self.code)
                }
                Some(CrossSignal::Bearish) => {
                    info!("{} death cross on the minute chart", self.code)
                }
                None => {}
            }
            self.last_seen = Some(bar.timestamp);
        }

        match analyze_window(&bars).and_then(|check| check.alert(&self.config).map(|a| (check, a))) {
            Some((check, AlertKind::Buy)) => {
                warn!("{} burst: buy alert", self.code);
                self.log.append(&format!(
                    "{} | BUY ALERT | {} | two-minute turnover {:.0}, range {:.2}, move {:+.2}",
                    self.code, now, check.turnover, check.fluctuation, check.direction
                ))?;
            }
            Some((check, AlertKind::Sell)) => {
                warn!("{} burst: sell alert", self.code);
                self.log.append(&format!(
                    "{} | SELL ALERT | {} | two-minute turnover {:.0}, range {:.2}, move {:+.2}",
                    self.code, now, check.turnover, check.fluctuation, check.direction
                ))?;
            }
            None => {
                self.log.append(&format!("all quiet | {now}"))?;
            }
        }
        Ok(())
    }
}
