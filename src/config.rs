//! Process configuration. The classification behaviour itself (schema
//! mapping, label vocabulary, artifact version tags, batch sizes) is
//! compiled-in constant data; the config only locates the artifacts and
//! shapes logging.

use crate::model::{ArtifactLayout, LAYER0_TAG, LAYER1_VERSION, NETWORK_TAG};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Root directory of the model artifacts (encoders/, stats/, layer0/,
    /// layer1/, optional manifest.json)
    pub model_dir: PathBuf,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl PredictorConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PredictorConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Artifact path conventions under `model_dir` with the compiled-in
    /// version tags.
    pub fn artifact_layout(&self) -> ArtifactLayout {
        ArtifactLayout::new(&self.model_dir, LAYER0_TAG, NETWORK_TAG, LAYER1_VERSION)
    }
}
