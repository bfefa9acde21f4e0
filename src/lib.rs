//! flowsentry — streaming DDoS-flow classifier.
//!
//! Modular structure:
//! - [`schema`] — Raw flow schema, trained-model schema, feature normalizer
//! - [`model`] — Pretrained classifier artifacts and the registry/loader
//! - [`pipeline`] — Gate, stacked two-layer ensemble, vote, predictor
//! - [`stream`] — Line-oriented stdin/stdout prediction protocol
//! - [`logging`] — Structured JSON logging and scoped suppression

pub mod config;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod stream;

pub use config::PredictorConfig;
pub use logging::StructuredLogger;
pub use model::{ModelError, ModelRegistry};
pub use pipeline::{Prediction, Predictor};
pub use schema::{normalize, FlowRecord, ModelRow, SchemaError};
