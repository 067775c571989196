//! Data module - CSV loading, cleaning and persistence

mod loader;
mod processor;
mod table;
mod writer;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError, SourceColumns};
pub use table::{ObservationTable, RATE_COL, YEAR_COL};
pub use writer::{DataWriter, WriterError};
