//! Dump one stock's recent daily bars plus today's 5-minute bars.

use anyhow::Result;
use askama::Template;
use chrono::{Duration, Utc};
use chrono_tz::Asia::Shanghai;
use starwatch::config::AppConfig;
use starwatch::provider::{EastmoneyClient, MarketData};
use starwatch::report::{write_output, SnapshotTemplate};

const DAILY_BARS: usize = 20;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app = AppConfig::from_env()?;
    let client = EastmoneyClient::new(app.provider_base_url.clone());
    let today = Utc::now().with_timezone(&Shanghai).date_naive();

    tracing::info!("Snapshotting {} as of {}", app.stock_code, today);

    // twice the span in calendar days comfortably covers 20 trading days
    let start = today - Duration::days(2 * DAILY_BARS as i64);
    let daily = client
        .daily_history(&app.stock_code, start, today)
        .await?
        .tail(DAILY_BARS);

    let minutes = client.minute_history(&app.stock_code, 5).await?;
    let todays: Vec<_> = minutes
        .into_iter()
        .filter(|bar| bar.timestamp.date() == today)
        .collect();
    tracing::info!(
        "{} daily bars, {} five-minute bars today",
        daily.len(),
        todays.len()
    );

    let rendered = SnapshotTemplate::new(&app.stock_code, today, &daily, &todays).render()?;
    let path = write_output(
        &app.output_dir,
        &format!("snapshot_{}.md", today.format("%m%d")),
        &rendered,
    )?;
    tracing::info!("Snapshot written to {}", path.display());

    Ok(())
}
