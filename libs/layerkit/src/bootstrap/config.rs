//! Layered application configuration.
//!
//! Layers, lowest priority first:
//! 1. built-in defaults
//! 2. YAML file (if provided)
//! 3. environment variables prefixed with [`ENV_PREFIX`], nested keys split on `__`
//!    (e.g. `PILOT__CONFORMANCE__ENABLED=false`)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::checker::ConformanceChecker;
use crate::hub::ComponentHub;
use crate::namespace::{DEFAULT_FRAMEWORK_SEGMENT, NamespaceScope};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PILOT__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Extract(#[source] Box<figment::Error>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub conformance: ConformanceConfig,
    pub logging: LoggingConfig,
    /// Free-form sections keyed by service configuration name.
    pub services: BTreeMap<String, serde_json::Value>,
    /// Named feature switches.
    pub features: BTreeMap<String, bool>,
}

impl AppConfig {
    /// Loads defaults, then `path` (if any), then the environment.
    ///
    /// # Errors
    /// [`ConfigError::MissingFile`] if `path` does not point to a file, and
    /// [`ConfigError::Extract`] if the merged layers do not deserialize.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Whether the named feature switch is on. Unknown features are off.
    #[must_use]
    pub fn feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Deserializes the `services.<name>` section.
    ///
    /// # Errors
    /// Fails if the section is missing or does not match `T`.
    pub fn service<T: serde::de::DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
        let section = self
            .services
            .get(name)
            .with_context(|| format!("missing services.{name} section"))?;
        serde_json::from_value(section.clone())
            .with_context(|| format!("invalid services.{name} section"))
    }

    /// Effective configuration rendered as YAML.
    ///
    /// # Errors
    /// Fails if serialization fails.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    pub enabled: bool,
    /// Root module path of application code. Defaults to the crate name of the
    /// binary being assembled.
    pub application_root: Option<String>,
    pub framework_segment: String,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            application_root: None,
            framework_segment: DEFAULT_FRAMEWORK_SEGMENT.to_owned(),
        }
    }
}

impl ConformanceConfig {
    /// Namespace scope, falling back to `default_root` (usually
    /// `env!("CARGO_CRATE_NAME")`) when no root is configured.
    #[must_use]
    pub fn scope(&self, default_root: &str) -> NamespaceScope {
        let root = self
            .application_root
            .as_deref()
            .filter(|root| !root.trim().is_empty())
            .unwrap_or(default_root);
        NamespaceScope::with_framework_segment(root, self.framework_segment.as_str())
    }

    /// Hub for assembling the application: gated by a standard checker unless
    /// conformance checking is disabled.
    #[must_use]
    pub fn hub(&self, default_root: &str) -> ComponentHub {
        if self.enabled {
            ComponentHub::new(ConformanceChecker::standard(self.scope(default_root)))
        } else {
            tracing::warn!("conformance checking disabled");
            ComponentHub::unchecked()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `layerkit=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}
