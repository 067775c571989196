//! Pipeline Module
//! Runs load -> clean -> save -> plot -> fit -> predict -> plot, once.

use crate::charts::{ChartError, ChartSeries, StaticChartRenderer};
use crate::config::PipelineConfig;
use crate::data::{
    DataLoader, DataProcessor, DataWriter, LoaderError, ObservationTable, ProcessorError,
    WriterError,
};
use crate::stats::{Forecast, ForecastError, LinearTrend};
use polars::prelude::PolarsError;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] ProcessorError),
    #[error(transparent)]
    Save(#[from] WriterError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub cleaned_rows: usize,
    pub trend: LinearTrend,
    pub forecast: Forecast,
}

/// Load the raw export, print its summary and return the cleaned table.
pub fn load_and_clean(config: &PipelineConfig) -> Result<ObservationTable, PipelineError> {
    let raw = DataLoader::load_csv(&config.input_path)?;
    println!("\n{}", DataLoader::summary(&raw));

    let cleaned = DataProcessor::clean(raw, &config.source_columns)?;
    info!(rows = cleaned.height(), "cleaned observations");
    Ok(cleaned)
}

/// Fit the trend and predict every year of the configured horizon.
pub fn fit_and_forecast(
    table: &ObservationTable,
    config: &PipelineConfig,
) -> Result<(LinearTrend, Forecast), PipelineError> {
    let trend = LinearTrend::fit(table)?;
    let forecast = trend.forecast(config.forecast_years.clone());
    Ok((trend, forecast))
}

/// Run every step in order; the first failure aborts the run.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let cleaned = load_and_clean(config)?;

    DataWriter::save_csv(&cleaned, &config.cleaned_path)?;
    println!(
        "\n✅ Cleaned data saved to '{}'",
        config.cleaned_path.display()
    );

    let actual = ChartSeries::from_observations("Actual", &cleaned.observations()?);
    StaticChartRenderer::render_trend(&actual, &config.trend_chart_path, config.chart_size)?;
    if config.display_charts {
        StaticChartRenderer::display(&config.trend_chart_path);
    }

    let (trend, forecast) = fit_and_forecast(&cleaned, config)?;
    println!(
        "\n📈 Forecasted Obesity Rates ({}–{}):",
        config.forecast_years.start(),
        config.forecast_years.end()
    );
    for line in forecast.to_lines() {
        println!("{}", line);
    }

    let predicted = ChartSeries::from_forecast("Forecast", &forecast);
    StaticChartRenderer::render_forecast(
        &actual,
        &predicted,
        &config.forecast_chart_path,
        config.chart_size,
    )?;
    if config.display_charts {
        StaticChartRenderer::display(&config.forecast_chart_path);
    }

    Ok(PipelineReport {
        cleaned_rows: cleaned.height(),
        trend,
        forecast,
    })
}
