//! CSV Writer Module
//! Persists a cleaned table as CSV (header row, no index column).

use crate::data::ObservationTable;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Writes tables back to disk.
pub struct DataWriter;

impl DataWriter {
    /// Write `table` to `path`, replacing any existing file.
    pub fn save_csv(table: &ObservationTable, path: &Path) -> Result<(), WriterError> {
        let mut file = File::create(path).map_err(|source| WriterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // CsvWriter needs a mutable frame; the clone shares column buffers
        let mut df = table.as_dataframe().clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|source| WriterError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), rows = df.height(), "saved cleaned csv");
        Ok(())
    }
}
