//! Top-level prediction strategies over one loaded registry: the full
//! two-layer stacked pipeline, a layer-0-only probability-averaging path,
//! and a single-model bypass. The three are independent alternatives, not
//! stages of each other.

use super::{layers, vote};
use crate::model::{ModelError, ModelRegistry};
use crate::schema::{ModelRow, LABELS};
use rand::seq::SliceRandom;

/// A predicted label, tagged by how it was produced. `Fallback` is the
/// documented degraded mode used when the registry never finished loading:
/// a uniformly-random label from the fixed vocabulary, distinguishable so
/// callers may treat it as an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Real(String),
    Fallback(String),
}

impl Prediction {
    pub fn label(&self) -> &str {
        match self {
            Prediction::Real(l) | Prediction::Fallback(l) => l,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Prediction::Fallback(_))
    }
}

pub struct Predictor {
    registry: ModelRegistry,
}

impl Predictor {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    fn fallback() -> Prediction {
        let label = LABELS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("BENIGN");
        Prediction::Fallback(label.to_string())
    }

    /// Full two-layer pipeline for one row: standardize, layer-0
    /// probabilities, column-wise concatenation, layer-1 predictions,
    /// majority vote, label.
    pub fn predict(&self, row: &ModelRow) -> Result<Prediction, ModelError> {
        let Some(registry) = self.registry.loaded() else {
            return Ok(Self::fallback());
        };

        let features = registry.scaler.transform(std::slice::from_ref(row))?;
        let layer0 = layers::run_layer0(registry, features.view())?;
        let stacked = layers::concat_layer0(registry, &layer0)?;
        let layer1 = layers::run_layer1(registry, stacked.view())?;

        let votes: Vec<Vec<usize>> = layer1.into_iter().map(|(_, preds)| preds).collect();
        let winners = vote::mode_rows(&votes);
        let index = *winners
            .first()
            .ok_or_else(|| ModelError::Shape("vote produced no rows".into()))?;
        let label = registry
            .label_encoder
            .label(index)
            .ok_or_else(|| ModelError::Shape(format!("vote elected unknown class {index}")))?;
        Ok(Prediction::Real(label.to_string()))
    }

    /// Layer-0-only path: per row, mean each class's probability across the
    /// five base classifiers and pick the argmax class.
    pub fn predict_layer0(&self, rows: &[ModelRow]) -> Result<Vec<Prediction>, ModelError> {
        let Some(registry) = self.registry.loaded() else {
            return Ok(rows.iter().map(|_| Self::fallback()).collect());
        };

        let features = registry.scaler.transform(rows)?;
        let layer0 = layers::run_layer0(registry, features.view())?;

        // The accumulation below requires every matrix to share the
        // encoder's width; a mismatch must be an error, not a panic.
        let n_classes = registry.label_encoder.len();
        for (model_id, proba) in &layer0 {
            if proba.ncols() != n_classes {
                return Err(ModelError::Shape(format!(
                    "model {model_id} produced {} classes, expected {n_classes}",
                    proba.ncols()
                )));
            }
        }
        let n_models = layer0.len() as f32;

        let mut mean = layer0
            .first()
            .map(|(_, m)| m.clone())
            .ok_or_else(|| ModelError::Shape("layer-0 produced no models".into()))?;
        for (_, proba) in layer0.iter().skip(1) {
            mean += proba;
        }
        mean.mapv_inplace(|v| v / n_models);

        mean.outer_iter()
            .map(|row| {
                let mut best = 0;
                for (j, v) in row.iter().enumerate() {
                    if *v > row[best] {
                        best = j;
                    }
                }
                registry
                    .label_encoder
                    .label(best)
                    .map(|l| Prediction::Real(l.to_string()))
                    .ok_or_else(|| ModelError::Shape(format!("unknown class {best}")))
            })
            .collect()
    }

    /// Bypass the ensembles and use the standalone single-model handle.
    pub fn predict_model(&self, row: &ModelRow) -> Result<Prediction, ModelError> {
        let Some(registry) = self.registry.loaded() else {
            return Ok(Self::fallback());
        };

        let features = registry.scaler.transform(std::slice::from_ref(row))?;
        let preds = registry.model.predict(features.view())?;
        let index = *preds
            .first()
            .ok_or_else(|| ModelError::Shape("model produced no rows".into()))?;
        let label = registry
            .label_encoder
            .label(index)
            .ok_or_else(|| ModelError::Shape(format!("model predicted unknown class {index}")))?;
        Ok(Prediction::Real(label.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::model::classifier::stub::{StubDiscrete, StubProba};
    use crate::model::{
        probability_columns, BaseClassifier, LabelEncoder, LoadedRegistry, MetaClassifier,
        ModelRegistry, StandardScaler,
    };
    use crate::schema::{LAYER0_IDS, LAYER1_IDS};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    pub struct StubCounters {
        pub layer0: Vec<Arc<AtomicUsize>>,
        pub layer1: Vec<Arc<AtomicUsize>>,
        pub model: Arc<AtomicUsize>,
    }

    /// Registry whose five base classifiers return fixed probability vectors
    /// and whose three meta-classifiers return fixed class indices.
    pub fn stub_registry(
        classes: &[&str],
        feature_dim: usize,
        layer0_probas: [Vec<f32>; 5],
        layer1_classes: [usize; 3],
    ) -> (ModelRegistry, StubCounters) {
        let encoder = LabelEncoder {
            classes: classes.iter().map(|c| c.to_string()).collect(),
        };
        let scaler = StandardScaler {
            mean: vec![0.0; feature_dim],
            scale: vec![1.0; feature_dim],
        };

        let mut layer0_counters = Vec::new();
        let layer0 = LAYER0_IDS
            .iter()
            .zip(layer0_probas.into_iter())
            .map(|(id, proba)| {
                let (stub, calls) = StubProba::new(proba);
                layer0_counters.push(calls);
                (*id, BaseClassifier::Stub(stub))
            })
            .collect();

        let mut layer1_counters = Vec::new();
        let layer1 = LAYER1_IDS
            .iter()
            .zip(layer1_classes.into_iter())
            .map(|(id, class)| {
                let (stub, calls) = StubDiscrete::new(class);
                layer1_counters.push(calls);
                (*id, MetaClassifier::Stub(stub))
            })
            .collect();

        let column_names = probability_columns(&encoder.classes, LAYER0_IDS);

        // The standalone handle favors the last class, so tests can tell it
        // apart from the layer-0 stubs.
        let mut model_proba = vec![0.0; classes.len()];
        if let Some(last) = model_proba.last_mut() {
            *last = 1.0;
        }
        let (model_stub, model_calls) = StubProba::new(model_proba);
        let counters = StubCounters {
            layer0: layer0_counters,
            layer1: layer1_counters,
            model: model_calls,
        };

        let registry = ModelRegistry::from_parts(LoadedRegistry {
            label_encoder: encoder,
            scaler,
            layer0,
            layer1,
            column_names,
            model: BaseClassifier::Stub(model_stub),
        });
        (registry, counters)
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::stub_registry;
    use super::*;
    use std::sync::atomic::Ordering;

    fn row(values: Vec<f32>) -> ModelRow {
        ModelRow { values }
    }

    #[test]
    fn agreeing_metas_yield_a_real_label() {
        let (registry, counters) = stub_registry(
            &["BENIGN", "Syn"],
            2,
            [
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
            ],
            [0, 0, 0],
        );
        let predictor = Predictor::new(registry);
        let prediction = predictor.predict(&row(vec![1.0, 2.0])).unwrap();
        assert_eq!(prediction, Prediction::Real("BENIGN".to_string()));
        for calls in &counters.layer0 {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
        for calls in &counters.layer1 {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn meta_disagreement_falls_to_lowest_class() {
        let (registry, _) = stub_registry(
            &["BENIGN", "Syn", "TFTP"],
            2,
            [
                vec![0.4, 0.3, 0.3],
                vec![0.4, 0.3, 0.3],
                vec![0.4, 0.3, 0.3],
                vec![0.4, 0.3, 0.3],
                vec![0.4, 0.3, 0.3],
            ],
            [2, 0, 1],
        );
        let predictor = Predictor::new(registry);
        let prediction = predictor.predict(&row(vec![0.0, 0.0])).unwrap();
        assert_eq!(prediction, Prediction::Real("BENIGN".to_string()));
    }

    #[test]
    fn predict_layer0_selects_the_mean_max_class() {
        // Models alternate [0.1, 0.9] / [0.9, 0.1] over classes [A, B]:
        // class B averages 0.58 against 0.42, so B must win.
        let (registry, _) = stub_registry(
            &["A", "B"],
            2,
            [
                vec![0.1, 0.9],
                vec![0.9, 0.1],
                vec![0.1, 0.9],
                vec![0.9, 0.1],
                vec![0.1, 0.9],
            ],
            [0, 0, 0],
        );
        let predictor = Predictor::new(registry);
        let predictions = predictor
            .predict_layer0(&[row(vec![0.0, 0.0]), row(vec![1.0, 1.0])])
            .unwrap();
        assert_eq!(predictions.len(), 2);
        for p in predictions {
            assert_eq!(p, Prediction::Real("B".to_string()));
        }
    }

    #[test]
    fn predict_model_consults_only_the_standalone_handle() {
        // The layer-0 stubs all favor class 0; the standalone stub favors the
        // last class. A result of Syn proves the standalone handle answered.
        let (registry, counters) = stub_registry(
            &["BENIGN", "Syn"],
            2,
            [
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
                vec![0.9, 0.1],
            ],
            [0, 0, 0],
        );
        let predictor = Predictor::new(registry);
        let prediction = predictor.predict_model(&row(vec![0.0, 0.0])).unwrap();
        assert_eq!(prediction, Prediction::Real("Syn".to_string()));
        assert_eq!(counters.model.load(Ordering::SeqCst), 1);
        for calls in counters.layer0.iter().chain(counters.layer1.iter()) {
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn layer0_width_mismatch_is_an_error_not_a_panic() {
        // The second base classifier claims three classes against a
        // two-class encoder; both batch paths must surface a shape error.
        let (registry, _) = stub_registry(
            &["A", "B"],
            2,
            [
                vec![0.5, 0.5],
                vec![0.2, 0.3, 0.5],
                vec![0.5, 0.5],
                vec![0.5, 0.5],
                vec![0.5, 0.5],
            ],
            [0, 0, 0],
        );
        let predictor = Predictor::new(registry);

        let err = predictor.predict_layer0(&[row(vec![0.0, 0.0])]).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)), "got {err}");

        let err = predictor.predict(&row(vec![0.0, 0.0])).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)), "got {err}");
    }

    #[test]
    fn unloaded_registry_returns_tagged_fallback_from_vocabulary() {
        let predictor = Predictor::new(ModelRegistry::unloaded());
        for _ in 0..1000 {
            let p = predictor.predict(&row(vec![0.0, 0.0])).unwrap();
            assert!(p.is_fallback());
            assert!(LABELS.contains(&p.label()));
        }
    }

    #[test]
    fn unloaded_registry_fallback_covers_alternate_paths_too() {
        let predictor = Predictor::new(ModelRegistry::unloaded());
        assert!(predictor.predict_model(&row(vec![0.0])).unwrap().is_fallback());
        let batch = predictor.predict_layer0(&[row(vec![0.0]), row(vec![1.0])]).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(Prediction::is_fallback));
    }
}
