//! Confirmation ledger storage trait.

use crate::StoreError;
use ppml_types::{Identity, ProviderLedger};

/// Trait for storing each provider's ordered confirmation ledger.
///
/// Ledgers are read and written whole. A caller that reads a ledger, mutates
/// its copy, and only writes it back on success never leaves a partial update
/// behind.
pub trait ConfirmationStore {
    /// Get the ledger for a provider, or an empty ledger if it has none.
    fn get_ledger(&self, provider: &Identity) -> Result<ProviderLedger, StoreError>;

    /// Replace the ledger for a provider.
    fn put_ledger(&self, provider: &Identity, ledger: ProviderLedger) -> Result<(), StoreError>;

    /// Every provider that has at least one confirmation, in identity order.
    fn providers(&self) -> Result<Vec<Identity>, StoreError>;

    /// Total number of confirmations across all providers.
    fn confirmation_count(&self) -> Result<u64, StoreError>;
}
