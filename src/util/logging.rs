//! Structured logging setup
//!
//! Initialization for the `tracing` ecosystem: console output by default,
//! optional JSON for production pipelines, level selection via configuration
//! or the `BASEWRIGHT_LOG_LEVEL` / `RUST_LOG` environment variables.
//! Initialization is guarded by a `Once` and is safe to call repeatedly.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Controls the output of the logging subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display.
    pub level: Level,

    /// Emit JSON records instead of human-readable lines.
    pub use_json: bool,

    /// Include the module target (e.g. `basewright::github`) in records.
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Installs the global subscriber. Subsequent calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(
                    format!("basewright={}", config.level)
                        .parse()
                        .expect("valid filter directive"),
                )
                .add_directive("hyper=warn".parse().expect("valid filter directive"))
                .add_directive("reqwest=warn".parse().expect("valid filter directive"));
        }

        let registry = tracing_subscriber::registry().with(filter);
        if config.use_json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes with defaults (INFO, console output).
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes from `BASEWRIGHT_LOG_LEVEL`, falling back to INFO.
pub fn init_from_env() {
    let level = env::var("BASEWRIGHT_LOG_LEVEL")
        .ok()
        .map(|s| parse_level(&s))
        .unwrap_or(Level::INFO);
    init_logging(LoggingConfig::with_level(level));
}

/// Parses a level name, defaulting to INFO on anything unrecognized.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
