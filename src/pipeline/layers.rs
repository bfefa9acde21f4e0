//! Layer-0 and layer-1 ensemble passes. Both run under a scoped log
//! suppression guard held around the whole batch, not per model.

use crate::logging;
use crate::model::{LoadedRegistry, ModelError};
use ndarray::{Array2, ArrayView2, Axis};

/// Run every base classifier in fixed order over a standardized batch.
/// Returns `(modelId, probability matrix)` pairs; matrix rows follow input
/// rows, columns the encoder's class order.
pub fn run_layer0(
    registry: &LoadedRegistry,
    rows: ArrayView2<'_, f32>,
) -> Result<Vec<(&'static str, Array2<f32>)>, ModelError> {
    let _quiet = logging::suppressed();
    let mut results = Vec::with_capacity(registry.layer0.len());
    for (model_id, model) in &registry.layer0 {
        results.push((*model_id, model.predict_proba(rows)?));
    }
    Ok(results)
}

/// Concatenate layer-0 probability matrices column-wise into the layer-1
/// input. Column order matches `registry.column_names`; the width is checked
/// against it because a silent mismatch would corrupt every layer-1
/// prediction.
pub fn concat_layer0(
    registry: &LoadedRegistry,
    results: &[(&'static str, Array2<f32>)],
) -> Result<Array2<f32>, ModelError> {
    let views: Vec<ArrayView2<'_, f32>> = results.iter().map(|(_, m)| m.view()).collect();
    let stacked = ndarray::concatenate(Axis(1), &views)
        .map_err(|e| ModelError::Shape(format!("layer-0 concatenation failed: {e}")))?;
    if stacked.ncols() != registry.column_names.len() {
        return Err(ModelError::Shape(format!(
            "layer-1 input has {} columns, registry names {}",
            stacked.ncols(),
            registry.column_names.len()
        )));
    }
    Ok(stacked)
}

/// Run every meta-classifier in fixed order over the concatenated layer-0
/// output. Returns one integer prediction vector per model.
pub fn run_layer1(
    registry: &LoadedRegistry,
    rows: ArrayView2<'_, f32>,
) -> Result<Vec<(&'static str, Vec<usize>)>, ModelError> {
    let _quiet = logging::suppressed();
    let mut results = Vec::with_capacity(registry.layer1.len());
    for (model_id, model) in &registry.layer1 {
        results.push((*model_id, model.predict(rows)?));
    }
    Ok(results)
}
