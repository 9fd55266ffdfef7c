//! Logging setup for binaries built on Cloakroom.
//!
//! The library crates only emit `tracing` events. Something has to
//! install a subscriber to see them; this is a reasonable default.

use tracing_subscriber::EnvFilter;

/// Installs a formatted stderr subscriber filtered by `RUST_LOG`,
/// falling back to `default_filter` (e.g. `"info"`) when it isn't set.
///
/// Returns `false` if a global subscriber was already installed, which
/// is common in tests; the existing one is left alone.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
