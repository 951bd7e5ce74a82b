//! Tracing initialization for binaries and tests embedding the engine.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber with `RUST_LOG` taking precedence over the
/// supplied default filter. Safe to call more than once; later calls are
/// no-ops.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
