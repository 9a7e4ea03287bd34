//! The prediction pipeline: composition → batch → model → chart rows.

use crate::chart::{ChartData, ChartSpec, PredictionRow};
use crate::config::CalculatorConfig;
use crate::error::AppResult;
use sc_core::batch::temperatures;
use sc_core::{CompositionSample, TemperatureGrid, build_batch, melt};
use sc_model::{GbtreeModel, ModelError, StrengthModel};
use std::path::Path;
use std::sync::Arc;

/// Load the prediction model. Failure here is fatal for every frontend.
pub fn load_model(path: &Path) -> AppResult<GbtreeModel> {
    match GbtreeModel::load(path) {
        Ok(model) => Ok(model),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "cannot load strength model");
            Err(e.into())
        }
    }
}

/// Run one full pass for `sample` over `grid`.
///
/// Pure apart from the model's CPU cost: the same inputs always give the same
/// chart data.
pub fn run_pipeline<M: StrengthModel + ?Sized>(
    model: &M,
    sample: &CompositionSample,
    grid: &TemperatureGrid,
) -> AppResult<ChartData> {
    let batch = build_batch(sample, grid);
    let predictions = model.predict(&batch)?;
    if predictions.len() != batch.len() {
        return Err(ModelError::ShapeMismatch {
            what: "predictions per input row",
            expected: batch.len(),
            actual: predictions.len(),
        }
        .into());
    }

    let temps = temperatures(&batch);
    let rows = melt(&temps, &predictions)?;
    let table = temps
        .iter()
        .zip(&predictions)
        .map(|(&temperature_c, p)| PredictionRow {
            temperature_c,
            yield_mpa: p.yield_mpa,
            tensile_mpa: p.tensile_mpa,
        })
        .collect();

    tracing::debug!(points = batch.len(), rows = rows.len(), "pipeline run");
    Ok(ChartData { rows, table })
}

/// A loaded model together with the grid and chart it feeds.
///
/// The model is read-only after loading and can be shared between sessions.
#[derive(Clone)]
pub struct Calculator {
    model: Arc<dyn StrengthModel>,
    grid: TemperatureGrid,
    spec: ChartSpec,
}

impl Calculator {
    pub fn new(model: Arc<dyn StrengthModel>, config: &CalculatorConfig) -> Self {
        Self {
            model,
            grid: TemperatureGrid::standard(),
            spec: ChartSpec::from_config(&config.chart),
        }
    }

    /// Load the configured model and build a calculator around it.
    pub fn from_config(config: &CalculatorConfig) -> AppResult<Self> {
        config.validate()?;
        let model = load_model(&config.model_path)?;
        Ok(Self::new(Arc::new(model), config))
    }

    pub fn evaluate(&self, sample: &CompositionSample) -> AppResult<ChartData> {
        run_pipeline(self.model.as_ref(), sample, &self.grid)
    }

    pub fn grid(&self) -> &TemperatureGrid {
        &self.grid
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn model(&self) -> &dyn StrengthModel {
        self.model.as_ref()
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("grid", &self.grid)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
