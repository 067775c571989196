//! Data Processor Module
//! Handles data cleaning: missing values, renaming, type coercion and de-duplication.

use crate::data::table::{RATE_COL, YEAR_COL};
use crate::data::ObservationTable;
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{source_name}' not found (and no '{target}' column either)")]
    MissingColumn { source_name: String, target: String },
    #[error("Cannot rename '{source_name}' to '{target}': both columns exist")]
    ColumnConflict { source_name: String, target: String },
}

/// Source column names of the raw export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub year: String,
    pub rate: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            year: "DIM_TIME".to_string(),
            rate: "RATE_PER_100_N".to_string(),
        }
    }
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Run the full cleaning sequence in its fixed order.
    ///
    /// Cleaning its own output again yields an identical table.
    pub fn clean(
        table: ObservationTable,
        columns: &SourceColumns,
    ) -> Result<ObservationTable, ProcessorError> {
        let before = table.height();

        let table = Self::drop_missing(table)?;
        let table = Self::rename_columns(table, columns)?;
        let table = Self::coerce_types(table)?;
        let table = Self::drop_duplicates(table)?;

        Self::warn_negative_rates(&table)?;
        debug!(before, after = table.height(), "cleaning complete");
        Ok(table)
    }

    /// Remove every row holding a null in any column, or a NaN in a float column.
    pub fn drop_missing(table: ObservationTable) -> Result<ObservationTable, ProcessorError> {
        let df = table.into_dataframe();
        let before = df.height();

        let mut mask = BooleanChunked::full("keep".into(), true, before);
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            mask = &mask & &series.is_not_null();
            if series.dtype().is_float() {
                mask = &mask & &series.is_not_nan()?;
            }
        }
        let df = df.filter(&mask)?;

        debug!(dropped = before - df.height(), "dropped rows with missing values");
        Ok(df.into())
    }

    /// Rename the source year/rate columns to `Year` / `ObesityRate`.
    pub fn rename_columns(
        table: ObservationTable,
        columns: &SourceColumns,
    ) -> Result<ObservationTable, ProcessorError> {
        let mut df = table.into_dataframe();
        for (source_name, target) in [(&columns.year, YEAR_COL), (&columns.rate, RATE_COL)] {
            Self::rename_one(&mut df, source_name, target)?;
        }
        Ok(df.into())
    }

    fn rename_one(
        df: &mut DataFrame,
        source_name: &str,
        target: &str,
    ) -> Result<(), ProcessorError> {
        let has_source = df.column(source_name).is_ok();
        let has_target = df.column(target).is_ok();

        match (has_source, has_target) {
            (true, false) => {
                df.rename(source_name, target.into())?;
                Ok(())
            }
            // Already renamed by an earlier pass
            (false, true) => Ok(()),
            (true, true) if source_name == target => Ok(()),
            (true, true) => Err(ProcessorError::ColumnConflict {
                source_name: source_name.to_string(),
                target: target.to_string(),
            }),
            (false, false) => Err(ProcessorError::MissingColumn {
                source_name: source_name.to_string(),
                target: target.to_string(),
            }),
        }
    }

    /// Cast `Year` to Int64 and `ObesityRate` to Float64.
    ///
    /// Strict casts: a value that cannot be converted is an error, never a new null.
    pub fn coerce_types(table: ObservationTable) -> Result<ObservationTable, ProcessorError> {
        let mut df = table.into_dataframe();
        for (name, dtype) in [(YEAR_COL, DataType::Int64), (RATE_COL, DataType::Float64)] {
            let cast = df
                .column(name)?
                .as_materialized_series()
                .strict_cast(&dtype)?;
            df.with_column(cast)?;
        }
        Ok(df.into())
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in file order.
    pub fn drop_duplicates(table: ObservationTable) -> Result<ObservationTable, ProcessorError> {
        let df = table.into_dataframe();
        let before = df.height();
        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;

        debug!(dropped = before - df.height(), "dropped duplicate rows");
        Ok(df.into())
    }

    fn warn_negative_rates(table: &ObservationTable) -> Result<(), ProcessorError> {
        for (year, rate) in table.observations()? {
            if rate < 0.0 {
                warn!(year, rate, "negative obesity rate kept in cleaned data");
            }
        }
        Ok(())
    }
}
