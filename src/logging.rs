//! Logging init for the command line tool.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,activity_card=debug";

/// Initialize structured logging to stderr, honouring `RUST_LOG` when set.
///
/// Stdout is left to the command output so that JSON results stay machine readable.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
