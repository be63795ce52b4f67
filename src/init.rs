//! Logger initialization.

/// Initializes `env_logger` with the level from the configuration file.
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // try_init so that repeated calls (e.g. from tests) stay harmless
    let _ = builder.format_timestamp_millis().try_init();
}
