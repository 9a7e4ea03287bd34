//! Inference batch construction.
//!
//! The model consumes 14 positional features: the 13 composition columns in
//! [`Element::ALL`] order followed by the temperature. Swapping two columns does
//! not fail, it silently yields wrong strengths, so the order lives in one
//! place ([`FEATURE_NAMES`]) and everything else derives from it.

use crate::composition::{CompositionSample, ELEMENT_COUNT, Element};
use crate::grid::TemperatureGrid;
use crate::reshape::Property;

/// Number of model input features.
pub const FEATURE_COUNT: usize = ELEMENT_COUNT + 1;

/// Model input columns, in order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "carbon",
    "silicon",
    "manganese",
    "phosphorus",
    "sulphur",
    "nickel",
    "chromium",
    "molybdenum",
    "cooper",
    "vanadium",
    "aluminum",
    "nitrogen",
    "niobium_tantalum",
    "temperature_c",
];

/// One model input row: a composition at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InferenceRow {
    pub composition: [f64; ELEMENT_COUNT],
    pub temperature_c: f64,
}

impl InferenceRow {
    pub fn new(sample: &CompositionSample, temperature_c: f64) -> Self {
        Self {
            composition: sample.features(),
            temperature_c,
        }
    }

    /// Feature vector in [`FEATURE_NAMES`] order.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        out[..ELEMENT_COUNT].copy_from_slice(&self.composition);
        out[ELEMENT_COUNT] = self.temperature_c;
        out
    }

    pub fn element(&self, element: Element) -> f64 {
        self.composition[element.position()]
    }
}

/// Cross join one composition with every grid temperature, in grid order.
pub fn build_batch(sample: &CompositionSample, grid: &TemperatureGrid) -> Vec<InferenceRow> {
    grid.iter()
        .map(|t| InferenceRow::new(sample, f64::from(t)))
        .collect()
}

/// Temperature column of a batch.
pub fn temperatures(rows: &[InferenceRow]) -> Vec<f64> {
    rows.iter().map(|r| r.temperature_c).collect()
}

/// Predicted strengths for one input row, in MPa.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionPair {
    pub yield_mpa: f64,
    pub tensile_mpa: f64,
}

impl PredictionPair {
    pub fn new(yield_mpa: f64, tensile_mpa: f64) -> Self {
        Self {
            yield_mpa,
            tensile_mpa,
        }
    }

    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::YieldStrength => self.yield_mpa,
            Property::TensileStrength => self.tensile_mpa,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.yield_mpa.is_finite() && self.tensile_mpa.is_finite()
    }
}
