//! Obesity Trend - CSV cleaning, trend charts & linear forecast
//!
//! Reads the WHO obesity prevalence export, writes a tidy copy, charts the
//! series and extrapolates it with an ordinary least squares line.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;

pub use config::PipelineConfig;
pub use pipeline::{run, PipelineError, PipelineReport};
