//! Provisioning of the independent data and model registries.

use ppml_store::{ConfirmationStore, MemoryStore};

use crate::{DataConfirmation, ModelConfirmation, RegistryConfig};

/// The pair of registries a PPML deployment runs.
///
/// The two instances never share state; mapping or verifying in one is
/// invisible to the other.
pub struct Deployment<S: ConfirmationStore = MemoryStore> {
    pub data: DataConfirmation<S>,
    pub model: ModelConfirmation<S>,
}

impl Deployment<MemoryStore> {
    /// Instantiate both registries, empty and with default configuration.
    pub fn provision() -> Self {
        Self::with_config(RegistryConfig::default(), RegistryConfig::default())
    }

    pub fn with_config(data: RegistryConfig, model: RegistryConfig) -> Self {
        Self {
            data: DataConfirmation::with_config(data),
            model: ModelConfirmation::with_config(model),
        }
    }
}

impl<S: ConfirmationStore> Deployment<S> {
    /// Assemble a deployment over caller-supplied stores.
    pub fn with_stores(
        data_store: S,
        data_config: RegistryConfig,
        model_store: S,
        model_config: RegistryConfig,
    ) -> Self {
        Self {
            data: DataConfirmation::with_store(data_store, data_config),
            model: ModelConfirmation::with_store(model_store, model_config),
        }
    }
}
