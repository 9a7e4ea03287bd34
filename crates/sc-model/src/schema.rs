//! Named, ordered model inputs.

use crate::error::{ModelError, ModelResult};
use sc_core::FEATURE_NAMES;

/// Ordered list of feature names a model consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::steel()
    }
}

impl FeatureSchema {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The 13 composition columns followed by `temperature_c`.
    pub fn steel() -> Self {
        Self::new(FEATURE_NAMES)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Verify that `found` names exactly these columns in exactly this order.
    pub fn check(&self, found: &[String]) -> ModelResult<()> {
        if found.len() != self.names.len() {
            return Err(ModelError::ShapeMismatch {
                what: "feature count",
                expected: self.names.len(),
                actual: found.len(),
            });
        }
        match self
            .names
            .iter()
            .zip(found)
            .position(|(expected, found)| expected != found)
        {
            Some(position) => Err(ModelError::SchemaMismatch {
                position,
                expected: self.names[position].clone(),
                found: found[position].clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel_names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn steel_schema_accepts_itself() {
        let schema = FeatureSchema::steel();
        assert_eq!(schema.len(), 14);
        assert_eq!(schema.position("temperature_c"), Some(13));
        schema.check(&steel_names()).unwrap();
    }

    #[test]
    fn swapped_columns_are_reported() {
        let mut names = steel_names();
        names.swap(0, 1);
        let err = FeatureSchema::steel().check(&names).unwrap_err();
        match err {
            ModelError::SchemaMismatch {
                position,
                expected,
                found,
            } => {
                assert_eq!(position, 0);
                assert_eq!(expected, "carbon");
                assert_eq!(found, "silicon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_shape_mismatch() {
        let mut names = steel_names();
        names.pop();
        let err = FeatureSchema::steel().check(&names).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ShapeMismatch {
                expected: 14,
                actual: 13,
                ..
            }
        ));
    }
}
