//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Keep the HTTP stack's own request chatter at a configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, human format for development
//! - Diagnostic logs go to stderr; stdout carries only echo records
//! - `RUST_LOG`, when set, replaces the configured directives

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Crates whose internal logging is held at `listener_log_level`.
const LISTENER_TARGETS: [&str; 3] = ["tower_http", "hyper", "axum"];

/// Build the filter directives for a configuration.
pub fn filter_directives(config: &ObservabilityConfig) -> String {
    let mut directives = vec![config.log_level.to_ascii_lowercase()];
    let listener = config.listener_log_level.to_ascii_lowercase();
    directives.extend(
        LISTENER_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, listener)),
    );
    directives.join(",")
}

/// Install the global subscriber.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Human => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
