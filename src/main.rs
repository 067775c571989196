//! Obesity Trend - command line entry point
//!
//! Runs the pipeline once against the files in the working directory.

use anyhow::Result;
use obesity_trend::{run, PipelineConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&PipelineConfig::default())?;
    info!(
        rows = report.cleaned_rows,
        slope = report.trend.slope,
        intercept = report.trend.intercept,
        "done"
    );
    Ok(())
}
