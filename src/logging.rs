/**
 * Logging Initialisation
 *
 * Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`,
 * falling back to `lifebridge=info`.
 */

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "lifebridge=info";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns false if one was already set,
/// so calling it twice (or from tests) is harmless.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
        .is_ok()
}
