//! Shared application service layer for steelcalc.
//!
//! This crate provides a unified interface for both CLI and GUI frontends,
//! centralizing configuration, model loading, the prediction pipeline and
//! result export.

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod session;

// Re-export key types for convenience
pub use chart::{ChartData, ChartSeries, ChartSpec, PredictionRow};
pub use config::{CalculatorConfig, ChartConfig, DEFAULT_CONFIG_FILE, DEFAULT_MODEL_PATH};
pub use error::{AppError, AppResult};
pub use export::{ExportFormat, write_csv, write_json, write_table};
pub use pipeline::{Calculator, load_model, run_pipeline};
pub use session::Session;
