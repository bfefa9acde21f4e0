//! Raw flow-record schema, the trained-model schema, and the mapping between
//! them.

mod columns;
mod normalize;

pub use columns::{
    COLUMN_MAPPING, DROP_COLUMNS, FLOW_ID, FWD_HEADER_LEN, FWD_HEADER_LEN_DUP, LABELS, LAYER0_IDS,
    LAYER1_IDS, RAW_HEADERS,
};
pub use normalize::{model_columns, normalize};

use std::collections::HashMap;
use std::sync::OnceLock;

/// Schema-level failures: the wire row did not match the raw schema, or a
/// required raw field was absent during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    FieldCount { expected: usize, got: usize },
    MissingField(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::FieldCount { expected, got } => {
                write!(f, "Invalid data length: expected {expected}, got {got}")
            }
            SchemaError::MissingField(name) => write!(f, "missing raw field: {name}"),
        }
    }
}

impl std::error::Error for SchemaError {}

fn raw_index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        RAW_HEADERS
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect()
    })
}

/// One raw flow record: field values in `RAW_HEADERS` order, still as the
/// strings they arrived as. Transient, one per input line.
#[derive(Debug, Clone)]
pub struct FlowRecord {
    values: Vec<String>,
}

impl FlowRecord {
    /// Build from the comma-split fields of one line. The field count must
    /// match the raw schema exactly.
    pub fn from_fields(fields: Vec<String>) -> Result<Self, SchemaError> {
        if fields.len() != RAW_HEADERS.len() {
            return Err(SchemaError::FieldCount {
                expected: RAW_HEADERS.len(),
                got: fields.len(),
            });
        }
        Ok(Self { values: fields })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        raw_index().get(name).map(|&i| self.values[i].as_str())
    }

    /// The `Flow ID` field, carried through the pipeline but never a feature.
    pub fn flow_id(&self) -> &str {
        self.get(FLOW_ID).unwrap_or("")
    }
}

/// A record under the trained-model schema: one parsed value per entry of
/// [`model_columns`], in that order. Values may be NaN or infinite here; the
/// inference gate decides whether the row is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRow {
    pub values: Vec<f32>,
}

impl ModelRow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
