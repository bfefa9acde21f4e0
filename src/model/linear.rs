//! Linear meta-classifiers: a coefficient matrix plus intercepts. Both the
//! logistic and the ridge-style variant predict the argmax of the decision
//! function; the logistic link never changes the winning class, so the
//! probabilities are not materialized here.

use super::ModelError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// One coefficient row per class, `n_features` wide.
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

impl LinearClassifier {
    pub fn n_classes(&self) -> usize {
        self.coef.len()
    }

    pub fn decision_function(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        let n_classes = self.coef.len();
        if self.intercept.len() != n_classes {
            return Err(ModelError::Shape(format!(
                "linear model has {} coefficient rows but {} intercepts",
                n_classes,
                self.intercept.len()
            )));
        }
        let mut out = Array2::zeros((rows.nrows(), n_classes));
        for (i, row) in rows.outer_iter().enumerate() {
            for (c, coef) in self.coef.iter().enumerate() {
                if coef.len() != row.len() {
                    return Err(ModelError::Shape(format!(
                        "linear model expects {} features, row has {}",
                        coef.len(),
                        row.len()
                    )));
                }
                let mut score = self.intercept[c];
                for (w, x) in coef.iter().zip(row.iter()) {
                    score += w * x;
                }
                out[[i, c]] = score;
            }
        }
        Ok(out)
    }

    /// Class index per row: argmax over the decision function, first class
    /// winning exact ties.
    pub fn predict(&self, rows: ArrayView2<'_, f32>) -> Result<Vec<usize>, ModelError> {
        let scores = self.decision_function(rows)?;
        Ok(scores
            .outer_iter()
            .map(|row| {
                let mut best = 0;
                for (j, v) in row.iter().enumerate() {
                    if *v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect())
    }
}
