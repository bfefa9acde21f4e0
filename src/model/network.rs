//! Feed-forward network classifiers via ONNX Runtime. Input `[n, features]`
//! f32, output `[n, n_classes]` class probabilities. Sessions run in
//! inference-only mode; batch size and log verbosity are configuration on
//! this variant rather than call-site special cases.

use super::ModelError;
use ndarray::{s, Array2, ArrayView2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;

pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    n_classes: usize,
    /// Rows per inference call; 0 means the whole batch at once.
    batch_size: usize,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_name", &self.input_name)
            .field("n_classes", &self.n_classes)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load a session from an `.onnx` artifact. A missing or invalid model
    /// file is an error; there is no degraded mode at this level.
    pub fn load(path: &Path, n_classes: usize, batch_size: usize) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "onnx artifact missing"),
            });
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "output".to_string());

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            n_classes,
            batch_size,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Probability matrix for a batch of standardized rows, chunked by the
    /// configured batch size. An empty batch yields an empty
    /// `(0, n_classes)` matrix without a session call.
    pub fn predict_proba(&self, rows: ArrayView2<'_, f32>) -> Result<Array2<f32>, ModelError> {
        let n_rows = rows.nrows();
        let chunk = if self.batch_size == 0 {
            n_rows.max(1)
        } else {
            self.batch_size
        };

        let mut out = Array2::zeros((n_rows, self.n_classes));
        let mut start = 0;
        while start < n_rows {
            let end = (start + chunk).min(n_rows);
            let batch = rows.slice(s![start..end, ..]).to_owned();
            let proba = self.run_batch(batch)?;
            if proba.ncols() != self.n_classes {
                return Err(ModelError::Shape(format!(
                    "network produced {} classes, expected {}",
                    proba.ncols(),
                    self.n_classes
                )));
            }
            out.slice_mut(s![start..end, ..]).assign(&proba);
            start = end;
        }
        Ok(out)
    }

    fn run_batch(&self, batch: Array2<f32>) -> Result<Array2<f32>, ModelError> {
        let n_rows = batch.nrows();
        let input = Value::from_array(batch)?;

        let mut session = self.session.lock().expect("session lock");
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;
        let output = outputs.get(&self.output_name).ok_or_else(|| {
            ModelError::Shape(format!("network output {} missing", self.output_name))
        })?;
        let (_, data) = output.try_extract_tensor::<f32>()?;

        if data.len() != n_rows * self.n_classes {
            return Err(ModelError::Shape(format!(
                "network emitted {} values for {} rows of {} classes",
                data.len(),
                n_rows,
                self.n_classes
            )));
        }
        Array2::from_shape_vec((n_rows, self.n_classes), data.to_vec())
            .map_err(|e| ModelError::Shape(e.to_string()))
    }
}
