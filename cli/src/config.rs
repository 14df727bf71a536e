//! CLI configuration with TOML file support.

use anyhow::Context;
use ppml_registry::RegistryConfig;
use ppml_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the `ppml-registry` tool.
///
/// Every field has a default, so an empty or partial file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding `data.json` and `model.json` registry snapshots.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Data confirmation registry settings.
    #[serde(default)]
    pub data: RegistryConfig,

    /// Model confirmation registry settings.
    #[serde(default)]
    pub model: RegistryConfig,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./ppml_state")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn data_snapshot_path(&self) -> PathBuf {
        self.state_dir.join("data.json")
    }

    pub fn model_snapshot_path(&self) -> PathBuf {
        self.state_dir.join("model.json")
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            data: RegistryConfig::default(),
            model: RegistryConfig::default(),
        }
    }
}
