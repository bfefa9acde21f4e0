//! Inference Gate: rejects numerically invalid rows before any classifier
//! sees them. Skipping is policy, not an error; callers log and move on.

use crate::schema::ModelRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    /// Row contains an infinite or missing value; no prediction attempted.
    Skip,
}

/// Check every value for being finite and non-missing.
pub fn check(row: &ModelRow) -> GateDecision {
    if row.values.iter().all(|v| v.is_finite()) {
        GateDecision::Pass
    } else {
        GateDecision::Skip
    }
}
