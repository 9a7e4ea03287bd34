//! Prediction model trait.

use crate::error::ModelResult;
use crate::schema::FeatureSchema;
use sc_core::{InferenceRow, PredictionPair};
use std::sync::Arc;

/// Trait for strength prediction models.
///
/// Implementations are loaded once and then only read, so they must be
/// thread-safe (Send + Sync) to be shared between sessions.
pub trait StrengthModel: Send + Sync {
    /// Input columns the model was trained on.
    fn schema(&self) -> &FeatureSchema;

    /// Predict yield and tensile strength for each row.
    ///
    /// Output row `i` belongs to input row `i`; the output has exactly as many
    /// rows as the input.
    fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>>;
}

impl<M: StrengthModel + ?Sized> StrengthModel for Arc<M> {
    fn schema(&self) -> &FeatureSchema {
        (**self).schema()
    }

    fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>> {
        (**self).predict(rows)
    }
}

impl<M: StrengthModel + ?Sized> StrengthModel for &M {
    fn schema(&self) -> &FeatureSchema {
        (**self).schema()
    }

    fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>> {
        (**self).predict(rows)
    }
}
