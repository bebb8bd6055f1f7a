//! Logging configuration and initialization
//!
//! Diagnostics go to stderr through `tracing` so that stdout carries only the
//! probe report.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when the configured one is missing or unrecognised
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Normalise a configured log level to a filter directive
///
/// Only the first word is considered so that trailing comments in `.env`
/// files are tolerated. "warning" maps to "warn" and "critical" to "error".
pub fn resolve_level(log_level: &str) -> &'static str {
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_lowercase();

    match level.as_str() {
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => DEFAULT_LOG_LEVEL,
    }
}

/// Initialize the logging system with the specified level
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(resolve_level(log_level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
