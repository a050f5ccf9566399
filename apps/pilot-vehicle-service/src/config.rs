//! Service configuration components.

use layerkit::Component;
use layerkit::bootstrap::AppConfig;
use serde::{Deserialize, Serialize};

/// Name of the `services.<name>` section read by [`TransunionConfig`].
pub const TRANSUNION: &str = "transunion";

/// Settings of the `transunion` vehicle-history profile.
#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[component(service_config)]
#[serde(default)]
pub struct TransunionConfig {
    pub endpoint: String,
    /// Oldest model year accepted for registration.
    pub min_year: u16,
}

impl Default for TransunionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vehicle-history.transunion.example/v1".to_owned(),
            min_year: 1980,
        }
    }
}

impl TransunionConfig {
    /// Reads `services.transunion`, falling back to defaults when absent.
    ///
    /// # Errors
    /// Fails if the section exists but does not deserialize.
    pub fn from_app_config(config: &AppConfig) -> anyhow::Result<Self> {
        if config.services.contains_key(TRANSUNION) {
            config.service(TRANSUNION)
        } else {
            Ok(Self::default())
        }
    }
}
