//! Payload flavors: the data and model parameterizations of the registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ppml_store::MemoryStore;

use crate::registry::ConfirmationRegistry;

/// Runtime tag for a registry flavor, carried by events and log records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorKind {
    Data,
    Model,
}

impl FlavorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for FlavorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlavorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "data" => Ok(Self::Data),
            "model" => Ok(Self::Model),
            other => Err(format!("unknown flavor {other:?}, expected \"data\" or \"model\"")),
        }
    }
}

/// Compile-time marker selecting what a registry's payloads are.
pub trait Flavor: Send + Sync + 'static {
    const KIND: FlavorKind;
    /// Human name of the hashed payload, used in log messages.
    const PAYLOAD: &'static str;
}

/// Raw training data sets.
#[derive(Debug)]
pub enum Data {}

/// Trained models.
#[derive(Debug)]
pub enum Model {}

impl Flavor for Data {
    const KIND: FlavorKind = FlavorKind::Data;
    const PAYLOAD: &'static str = "data set";
}

impl Flavor for Model {
    const KIND: FlavorKind = FlavorKind::Model;
    const PAYLOAD: &'static str = "model";
}

/// Registry of data-set confirmations.
pub type DataConfirmation<S = MemoryStore> = ConfirmationRegistry<Data, S>;

/// Registry of model confirmations.
pub type ModelConfirmation<S = MemoryStore> = ConfirmationRegistry<Model, S>;
