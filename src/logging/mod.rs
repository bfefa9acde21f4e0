//! Structured logging and scoped suppression of framework output during
//! ensemble batches.
//!
//! Protocol lines (`[RESULT]`, `[INFO]`, `[ERROR]`) are written directly to
//! the stream writers, never through tracing, so suppression can never
//! reorder or swallow prediction output.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with JSON format (one JSON object per line)
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber: JSON lines to stderr, level from RUST_LOG
    /// or default. Stdout stays reserved for the line protocol.
    pub fn init(json: bool, default_level: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Suppress sub-error log output for the lifetime of the returned guard.
///
/// Installed as a scoped *default* subscriber around a whole ensemble batch,
/// then dropped, restoring whatever was installed before. Scoped acquisition
/// rather than ambient global state.
pub fn suppressed() -> tracing::subscriber::DefaultGuard {
    let quiet = tracing_subscriber::registry().with(EnvFilter::new("error"));
    tracing::subscriber::set_default(quiet)
}
