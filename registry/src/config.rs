//! Registry configuration with TOML support.

use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// Configuration for one registry instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whether state changes are published on the event bus.
    #[serde(default = "default_true")]
    pub emit_events: bool,
}

fn default_true() -> bool {
    true
}

impl RegistryConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        toml::from_str(s).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RegistryError> {
        toml::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            emit_events: default_true(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = RegistryConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, RegistryConfig::default());
        assert!(config.emit_events);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = RegistryConfig::from_toml_str("emit_events = false").unwrap();
        assert!(!config.emit_events);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = RegistryConfig { emit_events: false };
        let parsed = RegistryConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn mistyped_value_is_config_error() {
        let err = RegistryConfig::from_toml_str(r#"emit_events = "sometimes""#).unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }
}
