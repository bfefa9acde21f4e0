//! Capability-tagged classifier variants. Layer-0 models are probabilistic
//! (a class-probability matrix per batch); layer-1 models are discrete (one
//! class index per row). The network variants keep their batch/verbosity
//! quirks inside [`OnnxClassifier`], so call sites stay uniform.

use super::linear::LinearClassifier;
use super::nearest::KnnClassifier;
use super::network::OnnxClassifier;
use super::tree::{DecisionTree, GradientBoost, RandomForest};
use super::ModelError;
use ndarray::{Array2, ArrayView2};

/// A layer-0 base classifier: standardized features in, per-class
/// probabilities out.
#[derive(Debug)]
pub enum BaseClassifier {
    Tree(DecisionTree),
    Forest(RandomForest),
    Boosted(GradientBoost),
    Nearest(KnnClassifier),
    Network(OnnxClassifier),
    #[cfg(test)]
    Stub(stub::StubProba),
}

impl BaseClassifier {
    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        match self {
            BaseClassifier::Tree(m) => m.predict_proba(rows),
            BaseClassifier::Forest(m) => m.predict_proba(rows),
            BaseClassifier::Boosted(m) => m.predict_proba(rows),
            BaseClassifier::Nearest(m) => m.predict_proba(rows),
            BaseClassifier::Network(m) => m.predict_proba(rows),
            #[cfg(test)]
            BaseClassifier::Stub(m) => m.predict_proba(rows),
        }
    }

    /// Discrete class per row: argmax over the probability vector.
    pub fn predict(&self, rows: ArrayView2<'_, f32>) -> Result<Vec<usize>, ModelError> {
        let proba = self.predict_proba(rows)?;
        Ok(argmax_rows(&proba))
    }

    /// Class count the variant was fitted for.
    pub fn n_classes(&self) -> Option<usize> {
        match self {
            BaseClassifier::Tree(m) => Some(m.n_classes),
            BaseClassifier::Forest(m) => Some(m.n_classes),
            BaseClassifier::Boosted(m) => Some(m.n_classes),
            BaseClassifier::Nearest(m) => Some(m.n_classes),
            BaseClassifier::Network(m) => Some(m.n_classes()),
            #[cfg(test)]
            BaseClassifier::Stub(m) => Some(m.proba.len()),
        }
    }
}

/// A layer-1 meta-classifier: concatenated layer-0 probabilities in, one
/// class index per row out. The network variant takes the argmax of its own
/// probability output.
#[derive(Debug)]
pub enum MetaClassifier {
    Logistic(LinearClassifier),
    Ridge(LinearClassifier),
    Network(OnnxClassifier),
    #[cfg(test)]
    Stub(stub::StubDiscrete),
}

impl MetaClassifier {
    pub fn predict(&self, rows: ArrayView2<'_, f32>) -> Result<Vec<usize>, ModelError> {
        match self {
            MetaClassifier::Logistic(m) | MetaClassifier::Ridge(m) => m.predict(rows),
            MetaClassifier::Network(m) => {
                let proba = m.predict_proba(rows)?;
                Ok(argmax_rows(&proba))
            }
            #[cfg(test)]
            MetaClassifier::Stub(m) => m.predict(rows),
        }
    }

    /// Class count the variant was fitted for; the discrete stub does not
    /// record one.
    pub fn n_classes(&self) -> Option<usize> {
        match self {
            MetaClassifier::Logistic(m) | MetaClassifier::Ridge(m) => Some(m.n_classes()),
            MetaClassifier::Network(m) => Some(m.n_classes()),
            #[cfg(test)]
            MetaClassifier::Stub(_) => None,
        }
    }
}

fn argmax_rows(proba: &Array2<f32>) -> Vec<usize> {
    proba
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
        .collect()
}

#[cfg(test)]
pub(crate) mod stub {
    //! Call-counting stand-ins so ensemble behaviour is testable without
    //! artifact files on disk.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Probabilistic stub: returns the same probability vector for every row
    /// and counts invocations.
    #[derive(Debug, Clone)]
    pub struct StubProba {
        pub proba: Vec<f32>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubProba {
        pub fn new(proba: Vec<f32>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    proba,
                    calls: calls.clone(),
                },
                calls,
            )
        }

        pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out = Array2::zeros((rows.nrows(), self.proba.len()));
            for mut row in out.outer_iter_mut() {
                for (j, p) in self.proba.iter().enumerate() {
                    row[j] = *p;
                }
            }
            Ok(out)
        }
    }

    /// Discrete stub: predicts a fixed class index for every row.
    #[derive(Debug, Clone)]
    pub struct StubDiscrete {
        pub class: usize,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubDiscrete {
        pub fn new(class: usize) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    class,
                    calls: calls.clone(),
                },
                calls,
            )
        }

        pub fn predict(&self, rows: ArrayView2<'_, f32>) -> Result<Vec<usize>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![self.class; rows.nrows()])
        }
    }
}
