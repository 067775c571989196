//! Pipeline configuration: every path and constant the run depends on.

use crate::data::SourceColumns;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Where to read, where to write, and what to forecast.
///
/// `Default` gives the layout the binary runs with: everything relative to
/// the working directory.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub trend_chart_path: PathBuf,
    pub forecast_chart_path: PathBuf,
    pub source_columns: SourceColumns,
    pub forecast_years: RangeInclusive<i64>,
    /// Chart size in pixels (10x6 inches at 100 dpi).
    pub chart_size: (u32, u32),
    /// Open each chart in the system viewer after saving it.
    pub display_charts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("RELAY_WHS.csv"),
            cleaned_path: PathBuf::from("cleaned_data.csv"),
            trend_chart_path: PathBuf::from("obesity_trend.png"),
            forecast_chart_path: PathBuf::from("forecast.png"),
            source_columns: SourceColumns::default(),
            forecast_years: 2026..=2030,
            chart_size: (1000, 600),
            display_charts: true,
        }
    }
}

impl PipelineConfig {
    /// Default layout rooted at `dir`, with chart display turned off.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            input_path: dir.join(&defaults.input_path),
            cleaned_path: dir.join(&defaults.cleaned_path),
            trend_chart_path: dir.join(&defaults.trend_chart_path),
            forecast_chart_path: dir.join(&defaults.forecast_chart_path),
            display_charts: false,
            ..defaults
        }
    }
}
