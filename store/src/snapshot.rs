//! Registry snapshots — persist every provider ledger between runs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ppml_types::{Identity, ProviderLedger};

use crate::StoreError;

/// One provider and its ordered confirmations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub provider: Identity,
    pub confirmations: ProviderLedger,
}

/// The full contents of a registry's store at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Provider ledgers ordered by provider identity.
    pub ledgers: Vec<LedgerEntry>,
}

impl RegistrySnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(ledgers: Vec<LedgerEntry>) -> Self {
        Self {
            version: Self::VERSION,
            ledgers,
        }
    }

    pub fn check_version(&self) -> Result<(), StoreError> {
        if self.version != Self::VERSION {
            return Err(StoreError::Version {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self, StoreError> {
        let snapshot: Self =
            serde_json::from_str(s).map_err(|e| StoreError::Corruption(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Load a snapshot file; a missing file yields an empty snapshot.
    pub fn read_from(path: &Path) -> Result<Self, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new(Vec::new())),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the snapshot, replacing the target only once the new file is complete.
    pub fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}
