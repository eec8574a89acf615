//! Structured logging using **tracing**.
//!
//! Diagnostics go to stdout through [`crate::report`]. Everything the tool says
//! about its own run (files checked, files skipped, summary) goes through
//! tracing to stderr, so stdout stays clean for machine consumers.

/// Initializes the global tracing subscriber.
///
/// Call *once* at startup. Emits JSON lines to stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=logmeta_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
