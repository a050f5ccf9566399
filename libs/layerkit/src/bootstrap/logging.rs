//! Logging initialization for binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use super::config::{LogFormat, LoggingConfig};

/// Filter directive for the given configured level and `-v` count.
///
/// Each `-v` raises the floor: `-v` info, `-vv` debug, `-vvv` trace. The
/// configured level is kept when it is already more verbose.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbose: u8) -> String {
    let floor = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    match floor {
        Some(level) if rank(level) > rank(config.level.trim()) => level.to_owned(),
        _ => config.level.clone(),
    }
}

fn rank(level: &str) -> u8 {
    match level.to_ascii_lowercase().as_str() {
        "off" => 0,
        "error" => 1,
        "warn" => 2,
        "info" => 3,
        "debug" => 4,
        "trace" => 5,
        // Composite directives (`layerkit=debug,info`) are left to the user.
        _ => u8::MAX,
    }
}

/// Installs the global subscriber: `RUST_LOG` wins, else the configured level
/// raised by `verbose`. Output goes to stderr so stdout stays machine-readable.
///
/// Calling it twice is harmless; the second installation is ignored.
pub fn init_logging(config: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config, verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .boxed(),
    };

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed");
    }
}
