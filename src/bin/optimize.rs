//! Grid-search the MACD parameters for one stock and write the report.

use anyhow::Result;
use askama::Template;
use starwatch::backtest::{search, Evaluator, MacdEvaluator};
use starwatch::config::{AppConfig, SearchConfig};
use starwatch::provider::{recent_daily_history, EastmoneyClient};
use starwatch::report::{bars_to_csv, write_output, SearchReportTemplate};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let app = AppConfig::from_env()?;
    let config = SearchConfig::default();
    config.validate()?;

    tracing::info!(
        "Optimizing MACD parameters for {} over the last {} trading days",
        app.stock_code,
        app.history_days
    );

    let client = EastmoneyClient::new(app.provider_base_url.clone());
    let bars = recent_daily_history(&client, &app.stock_code, app.history_days).await?;
    tracing::info!("Loaded {} daily bars", bars.len());

    let csv_path = write_output(
        &app.output_dir,
        &format!("{}_stock_data.csv", app.stock_code),
        &bars_to_csv(&bars),
    )?;
    tracing::info!("Raw history saved to {}", csv_path.display());

    let outcome = search(&bars, &config);

    // replay the winner so the report can show its trades
    let detail = outcome.best_params.map(|params| {
        let mut evaluator = MacdEvaluator;
        evaluator.evaluate(&bars, params)
    });

    let report = SearchReportTemplate::new(
        &app.stock_code,
        app.history_days,
        &outcome,
        detail.as_ref(),
        config.success_threshold,
    );
    let report_path = write_output(&app.output_dir, "macd_report.md", &report.render()?)?;
    tracing::info!("Report written to {}", report_path.display());

    Ok(())
}
