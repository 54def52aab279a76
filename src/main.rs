//! vgsales_report - Video Game Sales Analysis
//!
//! Loads a sales CSV, fills missing values, prints best sellers per year and
//! decade, and charts the ten strongest years by total sales.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::{Context, Result};
use charts::{BarFigure, ChartRenderer, PublisherPalette};
use clap::Parser;
use config::{AnalysisConfig, Args};
use data::{DataCleaner, DataLoader};
use report::Reporter;
use stats::SalesAggregator;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Longest string value shown in report tables.
const REPORT_STR_LEN: &str = "60";

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, clean, aggregate and report; returns the chart to draw.
fn analyse<W: Write>(config: &AnalysisConfig, out: W) -> Result<BarFigure> {
    let input = config.input_path()?;
    info!("analysing {}", input.display());

    let mut table = DataLoader::load_csv(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let mut reporter = Reporter::new(out, config.head_rows);

    reporter.null_counts("Missing values before cleaning:", &table.null_counts())?;
    let summary = DataCleaner::clean(&mut table).context("cleaning data")?;
    info!(
        "cleaned {} rows ({} years, {} publishers filled)",
        table.len(),
        summary.years_filled,
        summary.publishers_filled
    );
    reporter.null_counts("\nMissing values after cleaning:", &summary.nulls_after)?;

    let by_year = SalesAggregator::top_games_by_year(&table).context("best games by year")?;
    reporter.top_games("Top Games by Year:", "year", &by_year)?;

    table.derive_decades();
    let by_decade =
        SalesAggregator::top_games_by_decade(&table).context("best games by decade")?;
    reporter.top_games("Top Games by Decade:", "decade", &by_decade)?;

    let totals = SalesAggregator::top_years_by_total_sales(&table, config.top_years)
        .context("total sales by year")?;
    reporter.year_totals("Top Years by Total Sales:", &totals)?;

    let palette = PublisherPalette::from_table(&table);
    info!("{} publishers in palette", palette.len());
    Ok(BarFigure::top_sales_by_year(
        &table,
        &totals,
        &palette,
        config.top_years,
    ))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AnalysisConfig::resolve(&args)?;
    init_logging(&config.log_level);

    // Polars shortens strings in printed frames; game titles are longer than its default.
    if std::env::var_os("POLARS_FMT_STR_LEN").is_none() {
        std::env::set_var("POLARS_FMT_STR_LEN", REPORT_STR_LEN);
    }

    let figure = analyse(&config, std::io::stdout().lock())?;

    ChartRenderer::render_png(&figure, &config.chart_output)
        .with_context(|| format!("rendering {}", config.chart_output.display()))?;
    gui::display(&figure, &config.chart_output, config.display).context("displaying chart")?;

    info!("done");
    Ok(())
}
