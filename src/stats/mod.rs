//! Statistics module - Linear trend fitting and forecasting

mod regression;

pub use regression::{Forecast, ForecastError, ForecastPoint, LinearTrend};
