//! Chart Series Module
//! Turns observations and forecasts into plottable series and axis bounds.

use crate::stats::Forecast;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::ops::Range;

/// Share of the value span added above and below the y-axis data range.
const Y_PADDING: f64 = 0.15;

/// One labelled line on a chart, sorted by year.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(i64, f64)>,
}

impl ChartSeries {
    /// Collapse observations sharing a year into their mean, ordered by year.
    pub fn from_observations(label: &str, observations: &[(i64, f64)]) -> Self {
        let mut by_year: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for &(year, rate) in observations {
            by_year.entry(year).or_default().push(rate);
        }

        let points = by_year
            .into_iter()
            .map(|(year, rates)| (year, rates.iter().mean()))
            .collect();

        Self {
            label: label.to_string(),
            points,
        }
    }

    pub fn from_forecast(label: &str, forecast: &Forecast) -> Self {
        Self {
            label: label.to_string(),
            points: forecast
                .points
                .iter()
                .map(|p| (p.year, p.rate))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Axis ranges covering every point of a set of series.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    pub x: Range<i64>,
    pub y: Range<f64>,
}

impl AxisBounds {
    /// Bounds with one year of margin on each side and padded rates.
    ///
    /// Returns `None` when there is no point to plot.
    pub fn covering<'a>(series: impl IntoIterator<Item = &'a ChartSeries>) -> Option<Self> {
        let mut x_min = i64::MAX;
        let mut x_max = i64::MIN;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for &(x, y) in series.into_iter().flat_map(|s| s.points.iter()) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            if !y.is_nan() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        if x_min > x_max || y_min.is_infinite() {
            return None;
        }

        let pad = ((y_max - y_min) * Y_PADDING).max(1.0);
        Some(Self {
            x: x_min.saturating_sub(1)..x_max.saturating_add(1),
            y: (y_min - pad).floor()..(y_max + pad).ceil(),
        })
    }
}
