//! Line-oriented prediction protocol over arbitrary reader/writer pairs.
//!
//! One comma-separated raw record per line. `__TERMINATE__` is a graceful
//! shutdown sentinel, an empty line is end-of-stream. Successful predictions
//! emit `[RESULT] <label>;<flowId>` on the output writer, diagnostics are
//! `[INFO]`, and failures go to the error writer as `[ERROR]` lines. A row
//! failure never terminates the stream.

use crate::pipeline::{self, GateDecision, Predictor};
use crate::schema::{normalize, FlowRecord};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Graceful-shutdown sentinel line.
pub const TERMINATE: &str = "__TERMINATE__";

/// What one input line did to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDisposition {
    Continue,
    Terminate,
    EndOfStream,
}

/// Process one line. Protocol output is written and flushed here; the caller
/// only decides whether to keep reading.
pub fn handle_line<W: Write, E: Write>(
    predictor: &Predictor,
    line: &str,
    out: &mut W,
    err: &mut E,
) -> std::io::Result<LineDisposition> {
    let line = line.trim();
    if line == TERMINATE {
        writeln!(out, "[INFO] Termination signal received")?;
        out.flush()?;
        return Ok(LineDisposition::Terminate);
    }
    if line.is_empty() {
        return Ok(LineDisposition::EndOfStream);
    }

    let fields: Vec<String> = line.split(',').map(str::to_string).collect();
    let record = match FlowRecord::from_fields(fields) {
        Ok(record) => record,
        Err(e) => {
            writeln!(err, "[ERROR] {e}")?;
            err.flush()?;
            return Ok(LineDisposition::Continue);
        }
    };
    let flow_id = record.flow_id().to_string();

    let row = match normalize(&record) {
        Ok(row) => row,
        Err(e) => {
            writeln!(err, "[ERROR] {e}")?;
            err.flush()?;
            return Ok(LineDisposition::Continue);
        }
    };

    if pipeline::check(&row) == GateDecision::Skip {
        writeln!(
            out,
            "[INFO] Record contains infinite or NaN values, skipping prediction for Flow ID: {flow_id}"
        )?;
        out.flush()?;
        return Ok(LineDisposition::Continue);
    }

    match predictor.predict(&row) {
        Ok(prediction) => {
            if prediction.is_fallback() {
                warn!(flow_id = %flow_id, "registry unloaded, emitting fallback label");
            }
            writeln!(out, "[RESULT] {};{flow_id}", prediction.label())?;
            out.flush()?;
        }
        Err(e) => {
            // Per-row containment: report and keep the stream alive.
            writeln!(err, "[ERROR] {e}")?;
            err.flush()?;
        }
    }
    Ok(LineDisposition::Continue)
}

/// Drive the protocol until end-of-stream or the terminate sentinel.
pub fn run<R: BufRead, W: Write, E: Write>(
    predictor: &Predictor,
    input: R,
    mut out: W,
    mut err: E,
) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match handle_line(predictor, &line, &mut out, &mut err)? {
            LineDisposition::Continue => {}
            LineDisposition::Terminate | LineDisposition::EndOfStream => break,
        }
    }
    debug!("input stream finished");
    Ok(())
}
