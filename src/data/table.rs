//! Observation Table
//! Thin wrapper over a Polars DataFrame holding one observation per row.

use polars::prelude::*;

/// Column holding the observation year after cleaning.
pub const YEAR_COL: &str = "Year";
/// Column holding the prevalence percentage after cleaning.
pub const RATE_COL: &str = "ObesityRate";

/// Ordered table of observations.
///
/// Every pipeline step takes a table and hands back a new one; nothing mutates
/// a table after it has been built.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    df: DataFrame,
}

impl ObservationTable {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Years of a cleaned table, in row order.
    pub fn years(&self) -> PolarsResult<Vec<i64>> {
        let ca = self.df.column(YEAR_COL)?.i64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Rates of a cleaned table, in row order.
    pub fn rates(&self) -> PolarsResult<Vec<f64>> {
        let ca = self.df.column(RATE_COL)?.f64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// `(year, rate)` pairs of a cleaned table, in row order.
    pub fn observations(&self) -> PolarsResult<Vec<(i64, f64)>> {
        Ok(self.years()?.into_iter().zip(self.rates()?).collect())
    }

    pub fn as_dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }
}

impl From<DataFrame> for ObservationTable {
    fn from(df: DataFrame) -> Self {
        Self::new(df)
    }
}

impl PartialEq for ObservationTable {
    fn eq(&self, other: &Self) -> bool {
        self.df.equals_missing(&other.df)
    }
}
