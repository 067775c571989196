//! CSV Data Loader Module
//! Handles CSV file loading and the console summary using Polars.

use crate::data::ObservationTable;
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Tokens read as missing values, on top of empty fields.
const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Rows shown in the summary preview.
const PREVIEW_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV '{path}': {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Console rendering of a freshly loaded frame.
struct DatasetSummary<'a>(&'a DataFrame);

impl fmt::Display for DatasetSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let df = self.0;

        writeln!(f, "--- Dataset Info ---")?;
        writeln!(f, "{} rows x {} columns", df.height(), df.width())?;
        writeln!(
            f,
            "{:>3}  {:<28} {:>14}  {}",
            "#", "Column", "Non-Null Count", "Dtype"
        )?;
        for (i, col) in df.get_columns().iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<28} {:>14}  {}",
                i,
                col.name().as_str(),
                col.len() - col.null_count(),
                col.dtype()
            )?;
        }

        let numeric = DataLoader::numeric_description(df);
        if !numeric.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{:<28} {:>10} {:>10} {:>10} {:>10}",
                "Numeric column", "mean", "std", "min", "max"
            )?;
            for (name, mean, std, min, max) in numeric {
                writeln!(
                    f,
                    "{:<28} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                    name, mean, std, min, max
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", df.head(Some(PREVIEW_ROWS)))
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row.
    ///
    /// The whole file is scanned for schema inference so a late non-numeric
    /// value cannot slip past a short inference window.
    pub fn load_csv(path: &Path) -> Result<ObservationTable, LoaderError> {
        let wrap = |source| LoaderError::CsvError {
            path: path.to_path_buf(),
            source,
        };

        let null_values =
            NullValues::AllColumns(NULL_TOKENS.iter().map(|s| (*s).into()).collect());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_null_values(Some(null_values))
            .finish()
            .map_err(wrap)?
            .collect()
            .map_err(wrap)?;

        info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded csv");
        Ok(ObservationTable::new(df))
    }

    /// Human-readable dataset summary: schema, non-null counts, numeric
    /// description and a preview of the first rows.
    pub fn summary(table: &ObservationTable) -> String {
        DatasetSummary(table.as_dataframe()).to_string()
    }

    /// Mean, std, min and max of every numeric column, ignoring nulls.
    fn numeric_description(df: &DataFrame) -> Vec<(String, f64, f64, f64, f64)> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .filter_map(|col| {
                let as_f64 = col.cast(&DataType::Float64).ok()?;
                let values: Vec<f64> = as_f64.f64().ok()?.into_iter().flatten().collect();
                if values.is_empty() {
                    debug!(column = col.name().as_str(), "numeric column has no values");
                    return None;
                }
                Some((
                    col.name().to_string(),
                    values.iter().mean(),
                    values.iter().std_dev(),
                    Statistics::min(values.iter()),
                    Statistics::max(values.iter()),
                ))
            })
            .collect()
    }
}
