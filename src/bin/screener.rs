//! Screen the whole STAR Market for quiet, cheap charts.

use anyhow::Result;
use askama::Template;
use starwatch::config::{AppConfig, ScreenerConfig};
use starwatch::provider::EastmoneyClient;
use starwatch::report::{write_output, ScreenerReportTemplate};
use starwatch::screener::run_screen;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app = AppConfig::from_env()?;
    let config = ScreenerConfig::default();

    let client = EastmoneyClient::new(app.provider_base_url.clone());
    let report = run_screen(&client, &config).await?;

    for (rank, winner) in report.winners.iter().enumerate() {
        tracing::info!(
            "#{} {} {} at {:.2} CNY, bandwidth {:.4}",
            rank + 1,
            winner.code,
            winner.name,
            winner.latest_price,
            winner.avg_bandwidth
        );
    }

    let rendered = ScreenerReportTemplate::new(&config, &report).render()?;
    let path = write_output(&app.output_dir, "screener_report.md", &rendered)?;
    tracing::info!("Report written to {}", path.display());

    Ok(())
}
