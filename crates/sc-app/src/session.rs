//! Per-user interactive state.
//!
//! A session owns the current composition and the chart computed for it. The
//! host calls [`Session::refresh`] after every input change; the pipeline only
//! runs again when the composition actually differs from the last run.

use crate::chart::ChartData;
use crate::error::AppResult;
use crate::pipeline::Calculator;
use sc_core::{CompositionSample, Element};

#[derive(Debug, Clone, Default)]
pub struct Session {
    sample: CompositionSample,
    last: Option<(CompositionSample, ChartData)>,
    runs: usize,
}

impl Session {
    pub fn new(sample: CompositionSample) -> Self {
        Self {
            sample,
            last: None,
            runs: 0,
        }
    }

    pub fn sample(&self) -> &CompositionSample {
        &self.sample
    }

    pub fn sample_mut(&mut self) -> &mut CompositionSample {
        &mut self.sample
    }

    pub fn set_index(&mut self, element: Element, index: usize) {
        self.sample.set_index(element, index);
    }

    /// Put every field back to its default value.
    pub fn reset(&mut self) {
        self.sample = CompositionSample::default();
    }

    /// Chart for the current composition, recomputed only if it changed.
    ///
    /// On failure the previous chart is kept and stays available via
    /// [`Session::chart`].
    pub fn refresh(&mut self, calculator: &Calculator) -> AppResult<&ChartData> {
        let current = match self.last.take() {
            Some((sample, data)) if sample == self.sample => (sample, data),
            previous => match calculator.evaluate(&self.sample) {
                Ok(data) => {
                    self.runs += 1;
                    (self.sample, data)
                }
                Err(e) => {
                    self.last = previous;
                    return Err(e);
                }
            },
        };
        let (_, data) = self.last.insert(current);
        Ok(data)
    }

    /// Last computed chart, if any.
    pub fn chart(&self) -> Option<&ChartData> {
        self.last.as_ref().map(|(_, data)| data)
    }

    /// Number of pipeline executions so far.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorConfig;
    use sc_core::{InferenceRow, PredictionPair};
    use sc_model::{FeatureSchema, ModelError, ModelResult, StrengthModel};
    use std::sync::Arc;

    struct FlatModel(FeatureSchema);

    impl StrengthModel for FlatModel {
        fn schema(&self) -> &FeatureSchema {
            &self.0
        }

        fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>> {
            Ok(rows
                .iter()
                .map(|r| PredictionPair::new(r.composition[0] * 1000.0, 500.0))
                .collect())
        }
    }

    /// Fails for low-carbon compositions.
    struct PickyModel(FeatureSchema);

    impl StrengthModel for PickyModel {
        fn schema(&self) -> &FeatureSchema {
            &self.0
        }

        fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>> {
            if rows.first().is_some_and(|r| r.composition[0] < 0.1) {
                return Err(ModelError::NonFinite { row: 0 });
            }
            FlatModel(FeatureSchema::steel()).predict(rows)
        }
    }

    fn calculator() -> Calculator {
        Calculator::new(
            Arc::new(FlatModel(FeatureSchema::steel())),
            &CalculatorConfig::default(),
        )
    }

    #[test]
    fn unchanged_sample_reuses_last_run() {
        let calc = calculator();
        let mut session = Session::default();
        let first = session.refresh(&calc).unwrap().clone();
        let second = session.refresh(&calc).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(session.runs(), 1);
    }

    #[test]
    fn changed_sample_reruns() {
        let calc = calculator();
        let mut session = Session::default();
        session.refresh(&calc).unwrap();
        session.set_index(Element::Carbon, 0);
        let data = session.refresh(&calc).unwrap();
        assert_eq!(data.table[0].yield_mpa, 70.0);
        assert_eq!(session.runs(), 2);

        session.reset();
        let data = session.refresh(&calc).unwrap();
        assert_eq!(data.table[0].yield_mpa, 220.0);
        assert_eq!(session.runs(), 3);
    }

    #[test]
    fn failed_refresh_keeps_previous_chart() {
        let calc = Calculator::new(
            Arc::new(PickyModel(FeatureSchema::steel())),
            &CalculatorConfig::default(),
        );
        let mut session = Session::default();
        session.refresh(&calc).unwrap();

        session.set_index(Element::Carbon, 0);
        assert!(session.refresh(&calc).is_err());
        let kept = session.chart().unwrap();
        assert_eq!(kept.table[0].yield_mpa, 220.0);
        assert_eq!(session.runs(), 1);

        // the failed composition is retried, not cached
        assert!(session.refresh(&calc).is_err());
        session.reset();
        session.refresh(&calc).unwrap();
        assert_eq!(session.runs(), 1);
    }

    #[test]
    fn chart_is_empty_before_first_refresh() {
        let session = Session::new(CompositionSample::minimum());
        assert!(session.chart().is_none());
        assert_eq!(session.sample().get(Element::Carbon), 0.07);
    }
}
