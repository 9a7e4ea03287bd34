//! Gradient boosted regression trees.
//!
//! Evaluates an XGBoost `gbtree` booster trained with one output per tree
//! (`tree_info[i]` names the target tree `i` contributes to). Evaluation follows
//! XGBoost: features and thresholds are compared as `f32`, a feature strictly
//! below the threshold goes left, and a missing (NaN) feature follows the
//! node's default direction.

use crate::error::{ModelError, ModelResult};
use crate::model::StrengthModel;
use crate::schema::FeatureSchema;
use crate::xgboost::{ModelFile, TreeJson, parse_base_score};
use sc_core::{FEATURE_COUNT, InferenceRow, PredictionPair, Property};
use std::fmt;
use std::path::Path;

/// Number of regression targets: yield then tensile strength.
const NUM_TARGETS: usize = Property::ALL.len();

/// Objectives whose prediction is the raw margin (identity link).
const IDENTITY_OBJECTIVES: [&str; 4] = [
    "reg:squarederror",
    "reg:absoluteerror",
    "reg:pseudohubererror",
    "reg:quantileerror",
];

const LEAF: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Node {
    left: u32,
    right: u32,
    feature: u32,
    /// Split threshold, or the leaf value for leaves
    value: f32,
    default_left: bool,
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_json(tree: &TreeJson, index: usize, num_feature: usize) -> ModelResult<Self> {
        let n = tree.left_children.len();
        let bad = |what: String| ModelError::format(format!("tree {index}: {what}"));

        if n == 0 {
            return Err(bad("has no nodes".into()));
        }
        let lengths = [
            ("right_children", tree.right_children.len()),
            ("split_indices", tree.split_indices.len()),
            ("split_conditions", tree.split_conditions.len()),
            ("default_left", tree.default_left.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(bad(format!("{name} has {len} entries, expected {n}")));
            }
        }
        if tree.split_type.iter().any(|&t| t != 0) {
            return Err(ModelError::unsupported(format!(
                "tree {index} uses categorical splits"
            )));
        }
        if let Some(size) = tree
            .tree_param
            .as_ref()
            .and_then(|p| p.size_leaf_vector.as_ref())
        {
            if size.as_usize("size_leaf_vector")? > 1 {
                return Err(ModelError::unsupported(format!(
                    "tree {index} has vector leaves (multi_output_tree strategy)"
                )));
            }
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = tree.left_children[i];
            let right = tree.right_children[i];
            let node = if left == -1 {
                Node {
                    left: LEAF,
                    right: LEAF,
                    feature: 0,
                    value: tree.split_conditions[i] as f32,
                    default_left: false,
                }
            } else {
                // children always come after their parent, which also rules out cycles
                let child_ok = |c: i64| c > i as i64 && (c as usize) < n;
                if !child_ok(left) || !child_ok(right) {
                    return Err(bad(format!(
                        "node {i} has invalid children ({left}, {right})"
                    )));
                }
                let feature = tree.split_indices[i];
                if feature < 0 || feature as usize >= num_feature {
                    return Err(bad(format!(
                        "node {i} splits on feature {feature}, model has {num_feature}"
                    )));
                }
                Node {
                    left: left as u32,
                    right: right as u32,
                    feature: feature as u32,
                    value: tree.split_conditions[i] as f32,
                    default_left: tree.default_left[i].is_set(),
                }
            };
            nodes.push(node);
        }
        Ok(Self { nodes })
    }

    fn leaf_value(&self, features: &[f32]) -> f32 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.left == LEAF {
                return node.value;
            }
            let x = features[node.feature as usize];
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                x < node.value
            };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }
}

/// Descriptive facts about a loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub objective: String,
    pub num_trees: usize,
    pub num_features: usize,
    pub num_targets: usize,
    pub base_score: Vec<f64>,
    pub feature_names: Vec<String>,
    /// Writer version, e.g. "2.0.3"
    pub version: Option<String>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} trees, {} features, {} targets",
            self.objective, self.num_trees, self.num_features, self.num_targets
        )?;
        if let Some(v) = &self.version {
            write!(f, ", xgboost {v}")?;
        }
        write!(f, ")")
    }
}

/// Tree ensemble predicting yield and tensile strength.
#[derive(Debug, Clone)]
pub struct GbtreeModel {
    schema: FeatureSchema,
    objective: String,
    base_score: [f32; NUM_TARGETS],
    trees: Vec<Tree>,
    /// Target each tree contributes to
    tree_targets: Vec<usize>,
    version: Option<String>,
}

impl GbtreeModel {
    /// Load a model saved with `save_model("*.json")`.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            trees = model.trees.len(),
            objective = %model.objective,
            "loaded strength model"
        );
        Ok(model)
    }

    pub fn from_json_str(content: &str) -> ModelResult<Self> {
        let file: ModelFile = serde_json::from_str(content)?;
        Self::from_model_file(file)
    }

    fn from_model_file(file: ModelFile) -> ModelResult<Self> {
        let learner = file.learner;
        let expected = FeatureSchema::steel();

        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelError::unsupported(format!(
                "booster '{}' (only gbtree is evaluated)",
                learner.gradient_booster.name
            )));
        }
        let objective = learner.objective.name;
        if !IDENTITY_OBJECTIVES.contains(&objective.as_str()) {
            return Err(ModelError::unsupported(format!("objective '{objective}'")));
        }

        let params = &learner.learner_model_param;
        let num_feature = params.num_feature.as_usize("num_feature")?;
        if num_feature != expected.len() {
            return Err(ModelError::ShapeMismatch {
                what: "model input features",
                expected: expected.len(),
                actual: num_feature,
            });
        }
        if let Some(num_class) = &params.num_class {
            if num_class.as_usize("num_class")? > 0 {
                return Err(ModelError::unsupported("classification model"));
            }
        }
        let num_target = match &params.num_target {
            Some(n) => n.as_usize("num_target")?,
            None => 1,
        };
        if num_target != NUM_TARGETS {
            return Err(ModelError::ShapeMismatch {
                what: "model output targets",
                expected: NUM_TARGETS,
                actual: num_target,
            });
        }
        // Older writers leave feature names out; only check what is there.
        if !learner.feature_names.is_empty() {
            expected.check(&learner.feature_names)?;
        }

        let base_score = match &params.base_score {
            Some(value) => parse_base_score(value)?,
            None => vec![0.5],
        };
        let base_score: [f32; NUM_TARGETS] = match base_score.as_slice() {
            [b] => [*b as f32; NUM_TARGETS],
            [y, t] => [*y as f32, *t as f32],
            other => {
                return Err(ModelError::ShapeMismatch {
                    what: "base_score entries",
                    expected: NUM_TARGETS,
                    actual: other.len(),
                });
            }
        };

        let ensemble = learner
            .gradient_booster
            .model
            .ok_or_else(|| ModelError::format("gradient_booster has no model"))?;
        if ensemble.tree_info.len() != ensemble.trees.len() {
            return Err(ModelError::format(format!(
                "tree_info has {} entries for {} trees",
                ensemble.tree_info.len(),
                ensemble.trees.len()
            )));
        }

        let mut tree_targets = Vec::with_capacity(ensemble.tree_info.len());
        for (i, info) in ensemble.tree_info.iter().enumerate() {
            let target = info.as_usize("tree_info")?;
            if target >= NUM_TARGETS {
                return Err(ModelError::format(format!(
                    "tree {i} targets output {target}, model has {NUM_TARGETS}"
                )));
            }
            tree_targets.push(target);
        }

        let mut trees = ensemble
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| Tree::from_json(t, i, num_feature))
            .collect::<ModelResult<Vec<_>>>()?;

        // Early-stopped models predict with the trees up to the best iteration.
        if let Some(best) = learner.attributes.get("best_iteration") {
            let best: usize = best.trim().parse().map_err(|_| {
                ModelError::format(format!("best_iteration is not an integer: '{best}'"))
            })?;
            let parallel = match ensemble
                .gbtree_model_param
                .as_ref()
                .and_then(|p| p.num_parallel_tree.as_ref())
            {
                Some(n) => n.as_usize("num_parallel_tree")?.max(1),
                None => 1,
            };
            let keep = (best + 1) * parallel * NUM_TARGETS;
            if keep < trees.len() {
                tracing::debug!(best, keep, total = trees.len(), "truncating to best iteration");
                trees.truncate(keep);
                tree_targets.truncate(keep);
            }
        }

        let version = (!file.version.is_empty()).then(|| {
            file.version
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(".")
        });

        Ok(Self {
            schema: expected,
            objective,
            base_score,
            trees,
            tree_targets,
            version,
        })
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            objective: self.objective.clone(),
            num_trees: self.trees.len(),
            num_features: self.schema.len(),
            num_targets: NUM_TARGETS,
            base_score: self.base_score.iter().map(|&b| f64::from(b)).collect(),
            feature_names: self.schema.names().to_vec(),
            version: self.version.clone(),
        }
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn predict_row(&self, features: &[f64; FEATURE_COUNT]) -> [f32; NUM_TARGETS] {
        let x: [f32; FEATURE_COUNT] = features.map(|v| v as f32);
        let mut margin = self.base_score;
        for (tree, &target) in self.trees.iter().zip(&self.tree_targets) {
            margin[target] += tree.leaf_value(&x);
        }
        margin
    }
}

impl StrengthModel for GbtreeModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, rows: &[InferenceRow]) -> ModelResult<Vec<PredictionPair>> {
        if self.schema.len() != FEATURE_COUNT {
            return Err(ModelError::ShapeMismatch {
                what: "row features",
                expected: self.schema.len(),
                actual: FEATURE_COUNT,
            });
        }

        let mut out = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let [y, t] = self.predict_row(&row.features());
            let pair = PredictionPair::new(f64::from(y), f64::from(t));
            if !pair.is_finite() {
                return Err(ModelError::NonFinite { row: i });
            }
            out.push(pair);
        }
        tracing::debug!(rows = rows.len(), "predicted strength batch");
        Ok(out)
    }
}
