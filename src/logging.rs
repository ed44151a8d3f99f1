//! Structured logging setup
//!
//! Initializes the `tracing` subscriber with environment-based filtering via
//! `RUST_LOG`. All log output goes to stderr so stdout stays available for
//! command output and piped exports.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Call this once, early in `main()`. `default_level` is used when `RUST_LOG`
/// is not set; a second call is a no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
