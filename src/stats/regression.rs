//! Linear Regression Module
//! Ordinary least squares trend of rate over year, and extrapolation.

use crate::data::ObservationTable;
use polars::prelude::PolarsError;
use statrs::statistics::Statistics;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Cannot fit a trend to an empty table")]
    Empty,
    #[error("Got {years} years but {rates} rates")]
    LengthMismatch { years: usize, rates: usize },
    #[error("Cannot fit a trend through {distinct_years} distinct year(s); at least 2 are required")]
    SingularFit { distinct_years: usize },
}

/// Fitted line `rate = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

/// One predicted year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub year: i64,
    pub rate: f64,
}

/// Predicted rates over a horizon, in increasing year order.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
}

impl LinearTrend {
    /// Fit the trend to a cleaned table.
    pub fn fit(table: &ObservationTable) -> Result<Self, ForecastError> {
        let years = table.years()?;
        let rates = table.rates()?;
        Self::fit_points(&years, &rates)
    }

    /// Closed-form least squares: `slope = cov(x, y) / var(x)`.
    ///
    /// Requires at least two distinct years, otherwise `var(x)` is zero and the
    /// line is undefined.
    pub fn fit_points(years: &[i64], rates: &[f64]) -> Result<Self, ForecastError> {
        if years.len() != rates.len() {
            return Err(ForecastError::LengthMismatch {
                years: years.len(),
                rates: rates.len(),
            });
        }
        if years.is_empty() {
            return Err(ForecastError::Empty);
        }

        let distinct_years = years.iter().collect::<BTreeSet<_>>().len();
        if distinct_years < 2 {
            return Err(ForecastError::SingularFit { distinct_years });
        }

        let x: Vec<f64> = years.iter().map(|&y| y as f64).collect();

        let x_mean = x.iter().mean();
        let y_mean = rates.iter().mean();
        let slope = x.iter().covariance(rates.iter()) / x.iter().variance();
        let intercept = y_mean - slope * x_mean;

        debug!(slope, intercept, n = x.len(), "fitted linear trend");
        Ok(Self { slope, intercept })
    }

    pub fn predict(&self, year: i64) -> f64 {
        self.slope * year as f64 + self.intercept
    }

    /// Predict every year of `horizon`.
    pub fn forecast(&self, horizon: RangeInclusive<i64>) -> Forecast {
        Forecast {
            points: horizon
                .map(|year| ForecastPoint {
                    year,
                    rate: self.predict(year),
                })
                .collect(),
        }
    }
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Console listing: `YYYY: R.RR%` per line.
    pub fn to_lines(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| format!("{}: {:.2}%", p.year, p.rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn unit_slope_extrapolates_linearly() {
        let trend = LinearTrend::fit_points(&[2018, 2019, 2020], &[30.0, 31.0, 32.0]).unwrap();

        assert!((trend.slope - 1.0).abs() < EPS);
        assert!((trend.predict(2026) - 38.0).abs() < 1e-6);
    }

    #[test]
    fn noisy_points_minimise_squared_residuals() {
        // x = 0..=3 shifted to 2000, y = 1, 3, 2, 5
        let years = [2000, 2001, 2002, 2003];
        let rates = [1.0, 3.0, 2.0, 5.0];
        let trend = LinearTrend::fit_points(&years, &rates).unwrap();

        // cov = 5.5 / 3, var = 5 / 3
        assert!((trend.slope - 1.1).abs() < EPS);
        assert!((trend.predict(2000) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn repeated_years_still_fit() {
        let trend =
            LinearTrend::fit_points(&[2018, 2018, 2020, 2020], &[29.0, 31.0, 33.0, 35.0]).unwrap();

        assert!((trend.slope - 2.0).abs() < EPS);
        assert!((trend.predict(2019) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn single_distinct_year_is_singular() {
        let err = LinearTrend::fit_points(&[2020, 2020], &[30.0, 31.0]).unwrap_err();
        assert!(matches!(err, ForecastError::SingularFit { distinct_years: 1 }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = LinearTrend::fit_points(&[], &[]).unwrap_err();
        assert!(matches!(err, ForecastError::Empty));
    }

    #[test]
    fn forecast_covers_horizon_in_order() {
        let trend = LinearTrend {
            slope: 0.5,
            intercept: -990.0,
        };
        let forecast = trend.forecast(2026..=2030);

        let years: Vec<i64> = forecast.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2026, 2027, 2028, 2029, 2030]);
        assert_eq!(forecast.to_lines()[0], "2026: 23.00%");
        assert_eq!(forecast.to_lines()[4], "2030: 25.00%");
    }
}
