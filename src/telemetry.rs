//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize logging for the process.
///
/// Logs go to stderr so stdout only carries what the session renders.
/// `RUST_LOG` overrides the default level. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(verbose: bool) {
    let default_directive = if verbose { "spese=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
