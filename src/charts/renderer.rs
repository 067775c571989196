//! Static Chart Renderer
//! Draws the trend and forecast line charts to PNG with plotters.
//!
//! Both charts share one layout: white background with a light grid, a
//! centered title, "Year" on x and "Obesity Rate (%)" on y, lines with
//! point markers.

use crate::charts::{AxisBounds, ChartSeries};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

// Colors
const ACTUAL_COLOR: RGBColor = RGBColor(31, 119, 180); // Blue
const FORECAST_COLOR: RGBColor = RGBColor(255, 127, 14); // Orange
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);

const FONT: &str = "sans-serif";
const X_LABEL: &str = "Year";
const Y_LABEL: &str = "Obesity Rate (%)";

pub const TREND_TITLE: &str = "Obesity Prevalence Over Time in Rwanda (Age 18+)";
pub const FORECAST_TITLE: &str = "Forecasted Obesity Rate in Rwanda (2026–2030)";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart rendering failed: {0}")]
    Render(String),
    #[error("Nothing to plot for '{0}'")]
    EmptySeries(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Single-series chart of the cleaned observations.
    pub fn render_trend(
        actual: &ChartSeries,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        Self::render(path, size, TREND_TITLE, &[(actual, ACTUAL_COLOR)], false)
    }

    /// Observations and forecast overlaid, with a legend.
    pub fn render_forecast(
        actual: &ChartSeries,
        forecast: &ChartSeries,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        Self::render(
            path,
            size,
            FORECAST_TITLE,
            &[(actual, ACTUAL_COLOR), (forecast, FORECAST_COLOR)],
            true,
        )
    }

    /// Open a saved chart in the system image viewer.
    ///
    /// The file is already on disk, so a viewer failure is only logged.
    pub fn display(path: &Path) {
        match open::that(path) {
            Ok(()) => info!(path = %path.display(), "opened chart"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not open chart viewer"),
        }
    }

    fn render(
        path: &Path,
        size: (u32, u32),
        title: &str,
        series: &[(&ChartSeries, RGBColor)],
        with_legend: bool,
    ) -> Result<(), ChartError> {
        if let Some((empty, _)) = series.iter().find(|(s, _)| s.is_empty()) {
            return Err(ChartError::EmptySeries(empty.label.clone()));
        }
        let bounds = AxisBounds::covering(series.iter().map(|(s, _)| *s))
            .ok_or_else(|| ChartError::EmptySeries(title.to_string()))?;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style((FONT, 16))
            .bold_line_style(GRID_COLOR)
            .light_line_style(WHITE)
            .draw()?;

        for &(s, color) in series {
            chart
                .draw_series(LineSeries::new(
                    s.points.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(s.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart.draw_series(
                s.points
                    .iter()
                    .map(|&point| Circle::new(point, 4, color.filled())),
            )?;
        }

        if with_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        info!(path = %path.display(), title, "saved chart");
        Ok(())
    }
}
