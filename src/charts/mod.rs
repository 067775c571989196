//! Charts module - Static chart rendering

mod renderer;
mod series;

pub use renderer::{ChartError, StaticChartRenderer, FORECAST_TITLE, TREND_TITLE};
pub use series::{AxisBounds, ChartSeries};
