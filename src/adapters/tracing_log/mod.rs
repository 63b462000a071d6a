// Tracing log adapter - Subscriber set-up for structured logging

use tracing_subscriber::EnvFilter;

use crate::adapters::toml_config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Repeated calls are ignored so
/// tests and embedders can call this freely.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Diagnostics go to stderr; stdout carries observer output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Check a level directive before it reaches the subscriber
pub fn is_valid_level(level: &str) -> bool {
    EnvFilter::try_new(level).is_ok()
}
