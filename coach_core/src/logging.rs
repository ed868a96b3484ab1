//! Tracing setup shared by the coach binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at INFO unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("info")
}

/// Install the global subscriber with a specific default level
///
/// Output goes to stderr so that JSON written to stdout by the CLI can be
/// piped into other tools. RUST_LOG still takes precedence over
/// `default_level`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Map a `-v` count onto a default level
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
