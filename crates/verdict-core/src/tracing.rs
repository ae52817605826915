//! Tracing setup for binaries and test harnesses embedding the engine.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a global subscriber honoring `RUST_LOG`, defaulting to `info`.
/// Safe to call more than once — later calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize with an explicit default filter directive.
pub fn init_with_filter(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
