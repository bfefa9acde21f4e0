//! Inference pipeline: gate → standardization → layer-0 → concatenation →
//! layer-1 → vote, plus the alternate layer-0-only and single-model paths.

mod gate;
mod layers;
mod predictor;
mod vote;

pub use gate::{check, GateDecision};
pub use layers::{concat_layer0, run_layer0, run_layer1};
pub use predictor::{Prediction, Predictor};
pub use vote::mode_rows;

#[cfg(test)]
pub(crate) use predictor::testutil;
