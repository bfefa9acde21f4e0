//! Tree-based classifiers deserialized from versioned JSON parameter files:
//! a single probability tree, a forest of them, and boosted regression
//! stages with a softmax link.
//!
//! Node schema (serde-tagged): `{"kind":"split","feature":i,"threshold":t,
//! "left":l,"right":r}` or `{"kind":"leaf","value":...}` where the leaf
//! payload is a per-class probability vector for classification trees and a
//! single raw score for boosted regression trees. Node 0 is the root; a row
//! goes left when `row[feature] <= threshold`.

use super::ModelError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node<L> {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: L,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree<L> {
    pub nodes: Vec<Node<L>>,
}

impl<L> Tree<L> {
    /// Walk one row to its leaf payload. Step count is bounded by the node
    /// count so a malformed artifact cannot loop forever.
    fn leaf_for(&self, row: &[f32]) -> Result<&L, ModelError> {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().ok_or_else(|| {
                        ModelError::Shape(format!(
                            "tree split on feature {feature}, row has {}",
                            row.len()
                        ))
                    })?;
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(Node::Leaf { value }) => return Ok(value),
                None => {
                    return Err(ModelError::Shape(format!(
                        "tree node index {index} out of bounds"
                    )))
                }
            }
        }
        Err(ModelError::Shape("tree walk did not reach a leaf".into()))
    }
}

/// Single decision tree with per-class probability leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_classes: usize,
    pub tree: Tree<Vec<f32>>,
}

impl DecisionTree {
    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        let mut out = Array2::zeros((rows.nrows(), self.n_classes));
        for (i, row) in rows.outer_iter().enumerate() {
            let leaf = self.tree.leaf_for(row.as_slice().unwrap_or(&[]))?;
            if leaf.len() != self.n_classes {
                return Err(ModelError::Shape(format!(
                    "tree leaf has {} classes, expected {}",
                    leaf.len(),
                    self.n_classes
                )));
            }
            for (j, p) in leaf.iter().enumerate() {
                out[[i, j]] = *p;
            }
        }
        Ok(out)
    }
}

/// Forest of probability trees; the forest probability is the tree mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_classes: usize,
    pub trees: Vec<Tree<Vec<f32>>>,
}

impl RandomForest {
    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Shape("forest has no trees".into()));
        }
        let mut out = Array2::zeros((rows.nrows(), self.n_classes));
        for (i, row) in rows.outer_iter().enumerate() {
            let row = row.as_slice().unwrap_or(&[]);
            for tree in &self.trees {
                let leaf = tree.leaf_for(row)?;
                if leaf.len() != self.n_classes {
                    return Err(ModelError::Shape(format!(
                        "forest leaf has {} classes, expected {}",
                        leaf.len(),
                        self.n_classes
                    )));
                }
                for (j, p) in leaf.iter().enumerate() {
                    out[[i, j]] += *p;
                }
            }
        }
        out.mapv_inplace(|v| v / self.trees.len() as f32);
        Ok(out)
    }
}

/// Boosted classifier: per-stage regression trees, one tree per class, raw
/// scores accumulated onto the prior and squashed with softmax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoost {
    pub n_classes: usize,
    pub learning_rate: f32,
    pub init_scores: Vec<f32>,
    pub stages: Vec<Vec<Tree<f32>>>,
}

impl GradientBoost {
    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        if self.init_scores.len() != self.n_classes {
            return Err(ModelError::Shape(format!(
                "boost prior has {} classes, expected {}",
                self.init_scores.len(),
                self.n_classes
            )));
        }
        let mut out = Array2::zeros((rows.nrows(), self.n_classes));
        for (i, row) in rows.outer_iter().enumerate() {
            let row = row.as_slice().unwrap_or(&[]);
            let mut scores = self.init_scores.clone();
            for stage in &self.stages {
                if stage.len() != self.n_classes {
                    return Err(ModelError::Shape(format!(
                        "boost stage has {} trees, expected {}",
                        stage.len(),
                        self.n_classes
                    )));
                }
                for (j, tree) in stage.iter().enumerate() {
                    scores[j] += self.learning_rate * tree.leaf_for(row)?;
                }
            }
            softmax_into(&scores, out.row_mut(i));
        }
        Ok(out)
    }
}

fn softmax_into(scores: &[f32], mut row: ndarray::ArrayViewMut1<'_, f32>) {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for (j, s) in scores.iter().enumerate() {
        let e = (s - max).exp();
        row[j] = e;
        sum += e;
    }
    if sum > 0.0 {
        row.mapv_inplace(|v| v / sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stump(threshold: f32, low: Vec<f32>, high: Vec<f32>) -> Tree<Vec<f32>> {
        Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: low },
                Node::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn decision_tree_routes_rows_by_threshold() {
        let dt = DecisionTree {
            n_classes: 2,
            tree: stump(0.5, vec![0.9, 0.1], vec![0.2, 0.8]),
        };
        let rows = array![[0.0], [1.0]];
        let proba = dt.predict_proba(rows.view()).unwrap();
        assert_eq!(proba[[0, 0]], 0.9);
        assert_eq!(proba[[1, 1]], 0.8);
    }

    #[test]
    fn forest_averages_tree_probabilities() {
        let rf = RandomForest {
            n_classes: 2,
            trees: vec![
                stump(0.5, vec![1.0, 0.0], vec![0.0, 1.0]),
                stump(0.5, vec![0.5, 0.5], vec![0.5, 0.5]),
            ],
        };
        let proba = rf.predict_proba(array![[0.0]].view()).unwrap();
        assert!((proba[[0, 0]] - 0.75).abs() < 1e-6);
        assert!((proba[[0, 1]] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn boost_softmax_rows_sum_to_one() {
        let value_stump = |v_lo: f32, v_hi: f32| Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: v_lo },
                Node::Leaf { value: v_hi },
            ],
        };
        let gb = GradientBoost {
            n_classes: 2,
            learning_rate: 0.1,
            init_scores: vec![0.0, 0.0],
            stages: vec![vec![value_stump(1.0, -1.0), value_stump(-1.0, 1.0)]],
        };
        let proba = gb.predict_proba(array![[1.0]].view()).unwrap();
        let sum: f32 = proba.row(0).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(proba[[0, 1]] > proba[[0, 0]]);
    }

    #[test]
    fn tree_artifacts_deserialize_from_json() {
        let json = r#"{
            "n_classes": 2,
            "tree": {"nodes": [
                {"kind": "split", "feature": 3, "threshold": 1.5, "left": 1, "right": 2},
                {"kind": "leaf", "value": [1.0, 0.0]},
                {"kind": "leaf", "value": [0.0, 1.0]}
            ]}
        }"#;
        let dt: DecisionTree = serde_json::from_str(json).unwrap();
        let rows = array![[0.0, 0.0, 0.0, 2.0]];
        let proba = dt.predict_proba(rows.view()).unwrap();
        assert_eq!(proba[[0, 1]], 1.0);
    }

    #[test]
    fn out_of_bounds_node_is_an_error_not_a_hang() {
        let dt = DecisionTree {
            n_classes: 2,
            tree: Tree {
                nodes: vec![Node::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 7,
                    right: 7,
                }],
            },
        };
        assert!(dt.predict_proba(array![[1.0]].view()).is_err());
    }
}
