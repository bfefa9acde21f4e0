//! Pretrained classifier artifacts and the registry that loads them.
//!
//! Non-neural models are versioned JSON parameter files deserialized with
//! serde; the feed-forward networks are ONNX sessions. Everything is loaded
//! once at startup and read-only afterwards.

mod artifacts;
pub(crate) mod classifier;
mod linear;
mod nearest;
mod network;
mod registry;
mod tree;

pub use artifacts::{
    ArtifactLayout, LabelEncoder, Manifest, StandardScaler, LAYER0_TAG, LAYER1_NN_BATCH_SIZE,
    LAYER1_VERSION, NETWORK_TAG,
};
pub use classifier::{BaseClassifier, MetaClassifier};
pub use linear::LinearClassifier;
pub use nearest::KnnClassifier;
pub use network::OnnxClassifier;
pub use registry::{probability_columns, LoadedRegistry, ModelRegistry};
pub use tree::{DecisionTree, GradientBoost, RandomForest};

use std::path::PathBuf;

/// Failures while loading or invoking model artifacts. Load-time errors are
/// fatal to registry construction; invocation errors surface per row.
#[derive(Debug)]
pub enum ModelError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Onnx(ort::Error),
    Integrity { path: PathBuf, detail: String },
    Shape(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Io { path, source } => {
                write!(f, "artifact io error at {}: {source}", path.display())
            }
            ModelError::Parse { path, source } => {
                write!(f, "artifact parse error at {}: {source}", path.display())
            }
            ModelError::Onnx(e) => write!(f, "onnx runtime error: {e}"),
            ModelError::Integrity { path, detail } => {
                write!(f, "artifact integrity error at {}: {detail}", path.display())
            }
            ModelError::Shape(detail) => write!(f, "shape mismatch: {detail}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io { source, .. } => Some(source),
            ModelError::Parse { source, .. } => Some(source),
            ModelError::Onnx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ort::Error> for ModelError {
    fn from(e: ort::Error) -> Self {
        ModelError::Onnx(e)
    }
}
