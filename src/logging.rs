//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` (default `warn`, e.g.
/// `RUST_LOG=dc_load=debug`). Output goes to stderr so stdout carries only
/// reports.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Verbose subscriber for tests, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
