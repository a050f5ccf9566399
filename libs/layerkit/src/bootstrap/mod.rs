//! Binary bootstrap: layered configuration and logging.
//!
//! Enabled by the `bootstrap` feature.

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConfigError, ConformanceConfig, LogFormat, LoggingConfig};
pub use logging::init_logging;
