//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Fallback when `RUST_LOG` is unset: the cart/checkout services at debug
/// (skipped guest-merge lines and rollback events live there), everything
/// else at info.
const DEFAULT_DIRECTIVES: &str = "info,brocante_infra=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
