//! sc-model: strength prediction models for steelcalc.
//!
//! Provides:
//! - `StrengthModel` trait: rows of 14 features in, yield/tensile pairs out
//! - `FeatureSchema`: the named, ordered input columns a model was trained on
//! - `GbtreeModel`: gradient boosted regression trees read from the XGBoost
//!   JSON model format (`Booster.save_model("model.json")`)
//!
//! # Example
//!
//! ```no_run
//! use sc_core::{CompositionSample, TemperatureGrid, build_batch};
//! use sc_model::{GbtreeModel, StrengthModel};
//!
//! let model = GbtreeModel::load("models/xgb_model.json").unwrap();
//! let rows = build_batch(&CompositionSample::default(), &TemperatureGrid::standard());
//! let predictions = model.predict(&rows).unwrap();
//! assert_eq!(predictions.len(), rows.len());
//! ```

pub mod error;
pub mod gbtree;
pub mod model;
pub mod schema;
mod xgboost;

pub use error::{ModelError, ModelResult};
pub use gbtree::{GbtreeModel, ModelSummary};
pub use model::StrengthModel;
pub use schema::FeatureSchema;
