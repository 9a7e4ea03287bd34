//! Reshaping predictions into chart rows (wide to long).

use crate::batch::PredictionPair;
use crate::error::{CoreError, CoreResult};
use crate::numeric::ensure_finite;
use std::fmt;

/// Predicted mechanical property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    #[cfg_attr(feature = "serde", serde(rename = "Yield Strength (MPa)"))]
    YieldStrength,
    #[cfg_attr(feature = "serde", serde(rename = "Tensile Strength (MPa)"))]
    TensileStrength,
}

impl Property {
    /// Model output order.
    pub const ALL: [Property; 2] = [Property::YieldStrength, Property::TensileStrength];

    pub fn label(self) -> &'static str {
        match self {
            Self::YieldStrength => "Yield Strength (MPa)",
            Self::TensileStrength => "Tensile Strength (MPa)",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::YieldStrength => "yield",
            Self::TensileStrength => "tensile",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One charted value: a property at a temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartRow {
    pub temperature_c: f64,
    pub property: Property,
    pub value: f64,
}

/// Join temperatures with predictions by position and unpivot the two
/// property columns.
///
/// Rows come out grouped by property ([`Property::ALL`] order), each group in
/// input temperature order. A non-finite prediction is an error, so every row
/// carries a plottable value.
pub fn melt(temperatures: &[f64], predictions: &[PredictionPair]) -> CoreResult<Vec<ChartRow>> {
    if temperatures.len() != predictions.len() {
        return Err(CoreError::LengthMismatch {
            what: "predictions per temperature",
            expected: temperatures.len(),
            actual: predictions.len(),
        });
    }

    let mut rows = Vec::with_capacity(temperatures.len() * Property::ALL.len());
    for property in Property::ALL {
        for (&temperature_c, pair) in temperatures.iter().zip(predictions) {
            rows.push(ChartRow {
                temperature_c,
                property,
                value: ensure_finite(pair.get(property), property.short_name())?,
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melt_groups_by_property() {
        let temps = [20.0, 40.0];
        let preds = [PredictionPair::new(300.0, 450.0), PredictionPair::new(290.0, 440.0)];
        let rows = melt(&temps, &preds).unwrap();
        assert_eq!(
            rows,
            vec![
                ChartRow { temperature_c: 20.0, property: Property::YieldStrength, value: 300.0 },
                ChartRow { temperature_c: 40.0, property: Property::YieldStrength, value: 290.0 },
                ChartRow { temperature_c: 20.0, property: Property::TensileStrength, value: 450.0 },
                ChartRow { temperature_c: 40.0, property: Property::TensileStrength, value: 440.0 },
            ]
        );
    }

    #[test]
    fn melt_rejects_length_mismatch() {
        let err = melt(&[20.0, 40.0], &[PredictionPair::new(1.0, 2.0)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::LengthMismatch {
                what: "predictions per temperature",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn melt_rejects_non_finite_values() {
        let preds = [PredictionPair::new(300.0, 450.0), PredictionPair::new(290.0, f64::NAN)];
        let err = melt(&[20.0, 40.0], &preds).unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { what: "tensile", .. }));
    }

    #[test]
    fn melt_empty_is_empty() {
        assert!(melt(&[], &[]).unwrap().is_empty());
    }
}
