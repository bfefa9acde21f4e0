//! Feature Normalizer: remaps one raw record onto the schema the classifiers
//! were trained on.
//!
//! Steps, in order: duplicate `Fwd Header Len` under its second name, rename
//! every raw field per [`COLUMN_MAPPING`] (dropping unmapped fields), reorder
//! into the mapping's value order, strip whitespace from the mapped names,
//! then remove the [`DROP_COLUMNS`]. Applied exactly once per raw record.

use super::columns::{COLUMN_MAPPING, DROP_COLUMNS, FWD_HEADER_LEN, FWD_HEADER_LEN_DUP};
use super::{FlowRecord, ModelRow, SchemaError};
use std::sync::OnceLock;

/// Model-input column names after the rename, strip, and drop steps, in the
/// mapping's declared order. This is the exact schema the standardizer and
/// every classifier expect.
pub fn model_columns() -> &'static [&'static str] {
    static COLUMNS: OnceLock<Vec<&'static str>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        COLUMN_MAPPING
            .iter()
            .map(|(_, mapped)| mapped.trim())
            .filter(|name| !DROP_COLUMNS.contains(name))
            .collect()
    })
}

/// Remap one raw record to the model schema and parse its values.
///
/// Unparseable values become NaN rather than an error: the inference gate
/// owns the decision to skip numerically unusable rows. A raw field named by
/// the mapping but absent from the record is an error.
pub fn normalize(record: &FlowRecord) -> Result<ModelRow, SchemaError> {
    let dup = record
        .get(FWD_HEADER_LEN)
        .ok_or_else(|| SchemaError::MissingField(FWD_HEADER_LEN.to_string()))?;

    let mut values = Vec::with_capacity(model_columns().len());
    for (raw, mapped) in COLUMN_MAPPING {
        if DROP_COLUMNS.contains(&mapped.trim()) {
            continue;
        }
        let field = if *raw == FWD_HEADER_LEN_DUP {
            dup
        } else {
            record
                .get(raw)
                .ok_or_else(|| SchemaError::MissingField(raw.to_string()))?
        };
        values.push(parse_value(field));
    }

    Ok(ModelRow { values })
}

fn parse_value(field: &str) -> f32 {
    field.trim().parse::<f32>().unwrap_or(f32::NAN)
}
