//! Model Registry / Loader. Deserializes every artifact exactly once at
//! startup; the registry is immutable for the rest of the process. Loading
//! is all-or-nothing: any artifact failure propagates and the registry stays
//! unloaded, in which case prediction falls back to random labels.

use super::artifacts::{read_json, ArtifactLayout, LabelEncoder, Manifest, StandardScaler};
use super::classifier::{BaseClassifier, MetaClassifier};
use super::network::OnnxClassifier;
use super::{DecisionTree, GradientBoost, KnnClassifier, LinearClassifier, ModelError, RandomForest};
use crate::config::PredictorConfig;
use crate::schema::{model_columns, LAYER0_IDS};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Layer-0 probability column names for the layer-1 input matrix:
/// `{label}_{modelId}_PROB`, model ids outer, encoder class order inner.
/// This ordering is the contract the layer-1 models were trained against.
pub fn probability_columns(classes: &[String], model_ids: &[&str]) -> Vec<String> {
    let mut names = Vec::with_capacity(classes.len() * model_ids.len());
    for model_id in model_ids {
        for label in classes {
            names.push(format!("{label}_{model_id}_PROB"));
        }
    }
    names
}

/// Everything a prediction path needs, present only after a full load.
#[derive(Debug)]
pub struct LoadedRegistry {
    pub label_encoder: LabelEncoder,
    pub scaler: StandardScaler,
    /// Base classifiers in invocation and concatenation order.
    pub layer0: Vec<(&'static str, BaseClassifier)>,
    /// Meta-classifiers in invocation order.
    pub layer1: Vec<(&'static str, MetaClassifier)>,
    /// Column names of the concatenated layer-0 output.
    pub column_names: Vec<String>,
    /// Standalone single-model handle, deserialized independently of the
    /// layer-0 `DT` entry.
    pub model: BaseClassifier,
}

#[derive(Debug, Default)]
pub struct ModelRegistry {
    inner: Option<LoadedRegistry>,
}

impl ModelRegistry {
    pub fn unloaded() -> Self {
        Self { inner: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    pub fn loaded(&self) -> Option<&LoadedRegistry> {
        self.inner.as_ref()
    }

    /// Load every artifact: encoder first (the layer-0 column names depend on
    /// its class order), then scaler, base classifiers, meta-classifiers, and
    /// the standalone model. On error the registry remains unloaded.
    pub fn load(&mut self, config: &PredictorConfig) -> Result<(), ModelError> {
        let layout = config.artifact_layout();
        let manifest = Manifest::load_optional(layout.root())?;

        let label_encoder: LabelEncoder =
            read_verified(&layout.label_encoder(), &layout, manifest.as_ref())?;
        if label_encoder.is_empty() {
            return Err(ModelError::Shape("label encoder has no classes".into()));
        }
        let n_classes = label_encoder.len();

        let scaler: StandardScaler =
            read_verified(&layout.standard_scaler(), &layout, manifest.as_ref())?;
        scaler.check_dim(model_columns().len())?;

        let layer0 = vec![
            (
                "NN",
                BaseClassifier::Network(load_network(
                    &layout.layer0_network(),
                    &layout,
                    manifest.as_ref(),
                    n_classes,
                    0,
                )?),
            ),
            (
                "RF",
                BaseClassifier::Forest(read_verified::<RandomForest>(
                    &layout.layer0_forest(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
            (
                "DT",
                BaseClassifier::Tree(read_verified::<DecisionTree>(
                    &layout.layer0_tree(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
            (
                "KN",
                BaseClassifier::Nearest(read_verified::<KnnClassifier>(
                    &layout.layer0_nearest(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
            (
                "GB",
                BaseClassifier::Boosted(read_verified::<GradientBoost>(
                    &layout.layer0_boost(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
        ];

        let column_names = probability_columns(&label_encoder.classes, LAYER0_IDS);

        let layer1 = vec![
            (
                "M1",
                MetaClassifier::Logistic(read_verified::<LinearClassifier>(
                    &layout.layer1_logistic(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
            (
                "M2",
                MetaClassifier::Ridge(read_verified::<LinearClassifier>(
                    &layout.layer1_ridge(),
                    &layout,
                    manifest.as_ref(),
                )?),
            ),
            (
                "M3",
                MetaClassifier::Network(load_network(
                    &layout.layer1_network(),
                    &layout,
                    manifest.as_ref(),
                    n_classes,
                    super::artifacts::LAYER1_NN_BATCH_SIZE,
                )?),
            ),
        ];

        // Second, independent deserialization of the decision tree; the
        // standalone handle never aliases the layer-0 entry.
        let model = BaseClassifier::Tree(read_verified::<DecisionTree>(
            &layout.layer0_tree(),
            &layout,
            manifest.as_ref(),
        )?);

        check_class_counts(n_classes, &layer0, &layer1, &model)?;

        info!(
            classes = n_classes,
            layer0 = layer0.len(),
            layer1 = layer1.len(),
            "model registry loaded"
        );

        self.inner = Some(LoadedRegistry {
            label_encoder,
            scaler,
            layer0,
            layer1,
            column_names,
            model,
        });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(inner: LoadedRegistry) -> Self {
        Self { inner: Some(inner) }
    }
}

fn read_verified<T: DeserializeOwned>(
    path: &Path,
    layout: &ArtifactLayout,
    manifest: Option<&Manifest>,
) -> Result<T, ModelError> {
    if let Some(manifest) = manifest {
        manifest.verify(layout.root(), path)?;
    }
    read_json(path)
}

/// Every classifier must be fitted for the encoder's class count. A mixed
/// artifact set would misalign the probability columns downstream, so the
/// mismatch is a load failure rather than a per-row one.
fn check_class_counts(
    expected: usize,
    layer0: &[(&'static str, BaseClassifier)],
    layer1: &[(&'static str, MetaClassifier)],
    model: &BaseClassifier,
) -> Result<(), ModelError> {
    let counts = layer0
        .iter()
        .map(|(id, m)| (*id, m.n_classes()))
        .chain(layer1.iter().map(|(id, m)| (*id, m.n_classes())))
        .chain(std::iter::once(("model", model.n_classes())));
    for (id, n) in counts {
        if let Some(n) = n {
            if n != expected {
                return Err(ModelError::Shape(format!(
                    "model {id} fitted for {n} classes, label encoder has {expected}"
                )));
            }
        }
    }
    Ok(())
}

fn load_network(
    path: &Path,
    layout: &ArtifactLayout,
    manifest: Option<&Manifest>,
    n_classes: usize,
    batch_size: usize,
) -> Result<OnnxClassifier, ModelError> {
    if let Some(manifest) = manifest {
        manifest.verify(layout.root(), path)?;
    }
    OnnxClassifier::load(path, n_classes, batch_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_follow_model_then_class_order() {
        let classes = vec!["BENIGN".to_string(), "Syn".to_string()];
        let names = probability_columns(&classes, &["NN", "RF"]);
        assert_eq!(
            names,
            vec![
                "BENIGN_NN_PROB",
                "Syn_NN_PROB",
                "BENIGN_RF_PROB",
                "Syn_RF_PROB",
            ]
        );
    }

    #[test]
    fn unloaded_registry_reports_not_loaded() {
        let registry = ModelRegistry::unloaded();
        assert!(!registry.is_loaded());
        assert!(registry.loaded().is_none());
    }

    fn leaf_tree(n_classes: usize) -> BaseClassifier {
        use crate::model::tree::{Node, Tree};
        BaseClassifier::Tree(DecisionTree {
            n_classes,
            tree: Tree {
                nodes: vec![Node::Leaf {
                    value: vec![1.0 / n_classes as f32; n_classes],
                }],
            },
        })
    }

    fn logistic(n_classes: usize) -> MetaClassifier {
        MetaClassifier::Logistic(LinearClassifier {
            coef: vec![vec![0.0]; n_classes],
            intercept: vec![0.0; n_classes],
        })
    }

    #[test]
    fn consistent_class_counts_pass_the_load_check() {
        let layer0 = vec![("DT", leaf_tree(2))];
        let layer1 = vec![("M1", logistic(2))];
        assert!(check_class_counts(2, &layer0, &layer1, &leaf_tree(2)).is_ok());
    }

    #[test]
    fn mixed_class_counts_fail_the_load_check() {
        let layer0 = vec![("RF", leaf_tree(2)), ("DT", leaf_tree(3))];
        let layer1 = vec![("M1", logistic(2))];
        let err = check_class_counts(2, &layer0, &layer1, &leaf_tree(2)).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)), "got {err}");
        assert!(err.to_string().contains("DT"));
    }
}
