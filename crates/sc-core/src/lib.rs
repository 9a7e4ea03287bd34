//! sc-core: stable foundation for steelcalc.
//!
//! Contains:
//! - composition (the 13 alloying fields and their legal value ranges)
//! - grid (temperature sample points)
//! - batch (cross join of a composition with the grid)
//! - reshape (prediction output to chart rows)
//! - units (uom SI types + constructors)
//! - numeric (rounding + float helpers)
//! - error (shared error types)

pub mod batch;
pub mod composition;
pub mod error;
pub mod grid;
pub mod numeric;
pub mod reshape;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use batch::{FEATURE_COUNT, FEATURE_NAMES, InferenceRow, PredictionPair, build_batch};
pub use composition::{CompositionSample, ELEMENT_COUNT, Element, ValueRange};
pub use error::{CoreError, CoreResult};
pub use grid::TemperatureGrid;
pub use numeric::*;
pub use reshape::{ChartRow, Property, melt};
