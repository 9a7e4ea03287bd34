//! Serde mirror of the XGBoost JSON model format.
//!
//! Only the members needed for tree evaluation are declared; everything else in
//! the document is ignored. XGBoost writes most scalar parameters as JSON
//! strings (`"num_feature": "14"`), so those go through [`Num`].

use crate::error::{ModelError, ModelResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct ModelFile {
    pub learner: Learner,
    #[serde(default)]
    pub version: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Learner {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: GradientBooster,
    pub learner_model_param: LearnerModelParam,
    pub objective: Objective,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GradientBooster {
    pub name: String,
    #[serde(default)]
    pub model: Option<TreeEnsemble>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeEnsemble {
    #[serde(default)]
    pub gbtree_model_param: Option<GbtreeModelParam>,
    pub trees: Vec<TreeJson>,
    pub tree_info: Vec<Num>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GbtreeModelParam {
    #[serde(default)]
    pub num_parallel_tree: Option<Num>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LearnerModelParam {
    #[serde(default)]
    pub base_score: Option<Value>,
    pub num_feature: Num,
    #[serde(default)]
    pub num_target: Option<Num>,
    #[serde(default)]
    pub num_class: Option<Num>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Objective {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeJson {
    pub left_children: Vec<i64>,
    pub right_children: Vec<i64>,
    pub split_indices: Vec<i64>,
    pub split_conditions: Vec<f64>,
    pub default_left: Vec<Flag>,
    #[serde(default)]
    pub split_type: Vec<i64>,
    #[serde(default)]
    pub tree_param: Option<TreeParam>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeParam {
    #[serde(default)]
    pub size_leaf_vector: Option<Num>,
}

/// A number that may be written as a JSON number or a JSON string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Num {
    pub fn as_f64(&self, what: &str) -> ModelResult<f64> {
        match self {
            Num::Int(v) => Ok(*v as f64),
            Num::Float(v) => Ok(*v),
            Num::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ModelError::format(format!("{what} is not a number: '{s}'"))),
        }
    }

    pub fn as_usize(&self, what: &str) -> ModelResult<usize> {
        let v = self.as_f64(what)?;
        if v < 0.0 || v.fract() != 0.0 || !v.is_finite() {
            return Err(ModelError::format(format!(
                "{what} must be a non-negative integer, got {v}"
            )));
        }
        Ok(v as usize)
    }
}

/// `default_left` is stored as 0/1 integers by current XGBoost and as booleans
/// by some older writers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(crate) enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    pub fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

/// Parse `base_score`: a number, a numeric string (`"5E-1"`), a bracketed
/// list string (`"[3.1E2,4.2E2]"`) or a JSON array of either.
pub(crate) fn parse_base_score(value: &Value) -> ModelResult<Vec<f64>> {
    fn scalar(v: &Value) -> ModelResult<f64> {
        match v {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ModelError::format("base_score is not representable as f64")),
            Value::String(s) => Num::Str(s.clone()).as_f64("base_score"),
            other => Err(ModelError::format(format!(
                "base_score entry has unexpected type: {other}"
            ))),
        }
    }

    match value {
        Value::Array(items) => items.iter().map(scalar).collect(),
        Value::String(s) if s.trim_start().starts_with('[') => {
            let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
            inner
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| Num::Str(part.to_string()).as_f64("base_score"))
                .collect()
        }
        other => Ok(vec![scalar(other)?]),
    }
}
