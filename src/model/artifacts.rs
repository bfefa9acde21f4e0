//! Preprocessing artifacts and on-disk conventions.
//!
//! Artifact file names are keyed by the normalization-version tag they were
//! trained against (`model-dt-standard-v2.json`, `model-nn-standard-v4.onnx`,
//! layer-1 `model-lr-v1.json`, ...). An optional `manifest.json` at the root
//! pins SHA-256 digests per artifact; when present, every listed file is
//! verified before it is deserialized.

use super::ModelError;
use crate::schema::ModelRow;

/// Normalization-version tag the non-neural layer-0 artifacts carry.
pub const LAYER0_TAG: &str = "standard-v2";
/// Normalization-version tag of the layer-0 network artifact.
pub const NETWORK_TAG: &str = "standard-v4";
/// Version tag of the layer-1 artifacts.
pub const LAYER1_VERSION: &str = "v1";
/// Rows per inference call for the layer-1 network.
pub const LAYER1_NN_BATCH_SIZE: usize = 128;

use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fitted label encoder: class index ↔ label string, order fixed at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}

/// Fitted feature standardizer: per-feature mean and scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn check_dim(&self, expected: usize) -> Result<(), ModelError> {
        if self.mean.len() != expected || self.scale.len() != expected {
            return Err(ModelError::Shape(format!(
                "scaler fitted for {} features, schema has {expected}",
                self.mean.len()
            )));
        }
        Ok(())
    }

    /// Standardize a batch of model rows into an `(rows, features)` matrix.
    pub fn transform(&self, rows: &[ModelRow]) -> Result<Array2<f32>, ModelError> {
        let dim = self.dim();
        let mut out = Array2::zeros((rows.len(), dim));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(ModelError::Shape(format!(
                    "row has {} values, scaler expects {dim}",
                    row.len()
                )));
            }
            for (j, value) in row.values.iter().enumerate() {
                let scale = if self.scale[j] == 0.0 { 1.0 } else { self.scale[j] };
                out[[i, j]] = (value - self.mean[j]) / scale;
            }
        }
        Ok(out)
    }
}

/// SHA-256 digests per artifact, keyed by path relative to the model root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    /// Load `manifest.json` from the model root if one exists.
    pub fn load_optional(root: &Path) -> Result<Option<Self>, ModelError> {
        let path = root.join("manifest.json");
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&path)?))
    }

    /// Verify one artifact against the manifest. Files the manifest does not
    /// list pass unverified.
    pub fn verify(&self, root: &Path, path: &Path) -> Result<(), ModelError> {
        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let Some(expected) = self.files.get(&rel) else {
            return Ok(());
        };
        let data = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let digest = Sha256::digest(&data);
        let mut actual = String::with_capacity(64);
        for byte in digest {
            use std::fmt::Write;
            let _ = write!(actual, "{byte:02x}");
        }
        if &actual != expected {
            return Err(ModelError::Integrity {
                path: path.to_path_buf(),
                detail: format!("sha256 {actual} does not match manifest {expected}"),
            });
        }
        Ok(())
    }
}

/// Deserialize one JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves artifact paths under the model root for one set of version tags.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    root: PathBuf,
    layer0_tag: String,
    network_tag: String,
    layer1_version: String,
}

impl ArtifactLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        layer0_tag: impl Into<String>,
        network_tag: impl Into<String>,
        layer1_version: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            layer0_tag: layer0_tag.into(),
            network_tag: network_tag.into(),
            layer1_version: layer1_version.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn label_encoder(&self) -> PathBuf {
        self.root.join("encoders").join("label-encoder.json")
    }

    pub fn standard_scaler(&self) -> PathBuf {
        self.root.join("stats").join("standard-scaler.json")
    }

    fn layer0(&self, short: &str) -> PathBuf {
        self.root
            .join("layer0")
            .join(format!("model-{short}-{}.json", self.layer0_tag))
    }

    pub fn layer0_tree(&self) -> PathBuf {
        self.layer0("dt")
    }

    pub fn layer0_forest(&self) -> PathBuf {
        self.layer0("rf")
    }

    pub fn layer0_nearest(&self) -> PathBuf {
        self.layer0("kn")
    }

    pub fn layer0_boost(&self) -> PathBuf {
        self.layer0("gb")
    }

    pub fn layer0_network(&self) -> PathBuf {
        self.root
            .join("layer0")
            .join(format!("model-nn-{}.onnx", self.network_tag))
    }

    pub fn layer1_logistic(&self) -> PathBuf {
        self.root
            .join("layer1")
            .join(format!("model-lr-{}.json", self.layer1_version))
    }

    pub fn layer1_ridge(&self) -> PathBuf {
        self.root
            .join("layer1")
            .join(format!("model-rc-{}.json", self.layer1_version))
    }

    pub fn layer1_network(&self) -> PathBuf {
        self.root
            .join("layer1")
            .join(format!("model-nn-{}.onnx", self.layer1_version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaler_transforms_to_zero_mean_unit_scale() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        };
        let rows = vec![ModelRow {
            values: vec![14.0, 3.0],
        }];
        let out = scaler.transform(&rows).unwrap();
        assert_eq!(out[[0, 0]], 2.0);
        assert_eq!(out[[0, 1]], 3.0);
    }

    #[test]
    fn scaler_rejects_wrong_width_rows() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let rows = vec![ModelRow {
            values: vec![1.0, 2.0],
        }];
        assert!(scaler.transform(&rows).is_err());
    }

    #[test]
    fn layout_paths_carry_version_tags() {
        let layout = ArtifactLayout::new("models", "standard-v2", "standard-v4", "v1");
        assert!(layout
            .layer0_tree()
            .ends_with("layer0/model-dt-standard-v2.json"));
        assert!(layout
            .layer0_network()
            .ends_with("layer0/model-nn-standard-v4.onnx"));
        assert!(layout.layer1_ridge().ends_with("layer1/model-rc-v1.json"));
    }

    #[test]
    fn manifest_flags_corrupt_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, b"{}").unwrap();

        let mut manifest = Manifest::default();
        manifest
            .files
            .insert("a.json".to_string(), "00".repeat(32));
        let err = manifest.verify(dir.path(), &path).unwrap_err();
        assert!(matches!(err, ModelError::Integrity { .. }));
    }
}
