//! k-nearest-neighbour classifier over stored training points. The class
//! probability is the neighbour-vote fraction among the k closest points by
//! squared euclidean distance. Ties on distance resolve by stored point
//! order, so predictions are deterministic.

use super::ModelError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnClassifier {
    pub n_classes: usize,
    pub k: usize,
    pub points: Vec<Vec<f32>>,
    pub labels: Vec<usize>,
}

impl KnnClassifier {
    fn check(&self) -> Result<(), ModelError> {
        if self.k == 0 || self.points.is_empty() {
            return Err(ModelError::Shape("knn has no neighbours to vote".into()));
        }
        if self.points.len() != self.labels.len() {
            return Err(ModelError::Shape(format!(
                "knn has {} points but {} labels",
                self.points.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        self.check()?;
        let k = self.k.min(self.points.len());
        let mut out = Array2::zeros((rows.nrows(), self.n_classes));
        let mut distances: Vec<(f32, usize)> = Vec::with_capacity(self.points.len());

        for (i, row) in rows.outer_iter().enumerate() {
            distances.clear();
            for (p, point) in self.points.iter().enumerate() {
                if point.len() != row.len() {
                    return Err(ModelError::Shape(format!(
                        "knn point has {} features, row has {}",
                        point.len(),
                        row.len()
                    )));
                }
                let d: f32 = point
                    .iter()
                    .zip(row.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                distances.push((d, p));
            }
            distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

            for &(_, p) in &distances[..k] {
                let label = self.labels[p];
                if label >= self.n_classes {
                    return Err(ModelError::Shape(format!(
                        "knn label {label} outside {} classes",
                        self.n_classes
                    )));
                }
                out[[i, label]] += 1.0;
            }
            out.row_mut(i).mapv_inplace(|v| v / k as f32);
        }
        Ok(out)
    }
}
