//! Shared helpers for the cckit binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Honors `RUST_LOG` when set, falling back to `default_level`.  Diagnostics
/// go to stderr so the JSON emitted on stdout stays machine-readable.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
