//! Thread-safe in-memory ledger storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use ppml_types::{Identity, ProviderLedger};

use crate::snapshot::{LedgerEntry, RegistrySnapshot};
use crate::{ConfirmationStore, StoreError};

/// An in-memory confirmation store.
/// Thread-safe so a registry can be shared behind a lock by a host process.
#[derive(Default)]
pub struct MemoryStore {
    ledgers: Mutex<BTreeMap<Identity, ProviderLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a previously taken snapshot.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, StoreError> {
        snapshot.check_version()?;
        let mut ledgers = BTreeMap::new();
        for entry in snapshot.ledgers {
            if ledgers.insert(entry.provider.clone(), entry.confirmations).is_some() {
                return Err(StoreError::Corruption(format!(
                    "provider {} appears twice",
                    entry.provider
                )));
            }
        }
        Ok(Self {
            ledgers: Mutex::new(ledgers),
        })
    }

    /// Capture every non-empty ledger, ordered by provider identity.
    pub fn snapshot(&self) -> Result<RegistrySnapshot, StoreError> {
        let ledgers = self
            .lock()?
            .iter()
            .filter(|(_, ledger)| !ledger.is_empty())
            .map(|(provider, ledger)| LedgerEntry {
                provider: provider.clone(),
                confirmations: ledger.clone(),
            })
            .collect();
        Ok(RegistrySnapshot::new(ledgers))
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<Identity, ProviderLedger>>, StoreError> {
        self.ledgers
            .lock()
            .map_err(|e| StoreError::Backend(format!("ledger lock poisoned: {e}")))
    }
}

impl ConfirmationStore for MemoryStore {
    fn get_ledger(&self, provider: &Identity) -> Result<ProviderLedger, StoreError> {
        Ok(self.lock()?.get(provider).cloned().unwrap_or_default())
    }

    fn put_ledger(&self, provider: &Identity, ledger: ProviderLedger) -> Result<(), StoreError> {
        let mut ledgers = self.lock()?;
        if ledger.is_empty() {
            ledgers.remove(provider);
        } else {
            ledgers.insert(provider.clone(), ledger);
        }
        Ok(())
    }

    fn providers(&self) -> Result<Vec<Identity>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn confirmation_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.values().map(|l| l.len() as u64).sum())
    }
}
