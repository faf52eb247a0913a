//! Watch one stock's minute feed and log burst alerts.

use anyhow::Result;
use starwatch::config::{AppConfig, MonitorConfig};
use starwatch::monitor::Monitor;
use starwatch::provider::EastmoneyClient;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app = AppConfig::from_env()?;
    std::fs::create_dir_all(&app.output_dir)?;

    let config = MonitorConfig {
        log_file: Path::new(&app.output_dir)
            .join(format!("{}_signals.md", app.stock_code))
            .to_string_lossy()
            .into_owned(),
        ..MonitorConfig::default()
    };

    tracing::info!("Starting intraday watch for {}", app.stock_code);

    let client = EastmoneyClient::new(app.provider_base_url.clone());
    let mut monitor = Monitor::new(client, app.stock_code.clone(), config)?;
    monitor.run().await
}
