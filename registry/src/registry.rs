//! The confirmation registry and its verification state machine.
//!
//! Each provider owns an ordered ledger of confirmations, at most one per
//! claimant. A record is Pending until the provider resubmits its exact hash,
//! then Verified; a re-mapping to a different hash by the same claimant puts it
//! back to Pending. Re-mapping the hash a record already holds is always
//! rejected, so a verified record stays verified for as long as its hash is
//! unchanged. Records are never deleted.

use std::marker::PhantomData;

use ppml_store::{ConfirmationStore, MemoryStore, StoreError};
use ppml_types::{Confirmation, ContentHash, Identity};

use crate::{
    AuthenticatedCaller, Data, EventBus, Flavor, Model, RegistryConfig, RegistryError,
    RegistryEvent,
};

/// Result of a successful mapping call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapOutcome {
    /// A new pending record was appended at `index`.
    Created { index: usize },
    /// The claimant's existing record at `index` now holds the new hash and is pending again.
    Updated {
        index: usize,
        previous: ContentHash,
        was_verified: bool,
    },
}

impl MapOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Created { index } | Self::Updated { index, .. } => *index,
        }
    }
}

/// Result of a verification call. A wrong proof is an expected outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The record at `index`, asserted by `claimant`, is now verified.
    Verified { claimant: Identity, index: usize },
    /// No pending record carries the submitted hash; nothing changed.
    NoMatch,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// A registry of (claimant, provider) confirmations for one payload flavor.
///
/// State-changing operations take `&mut self`, so calls on one instance are
/// applied one at a time and each either fully takes effect or not at all.
/// Hosts sharing a registry across threads put it behind a `Mutex`.
pub struct ConfirmationRegistry<F: Flavor, S: ConfirmationStore = MemoryStore> {
    store: S,
    config: RegistryConfig,
    events: EventBus,
    _flavor: PhantomData<F>,
}

impl<F: Flavor> ConfirmationRegistry<F, MemoryStore> {
    /// An empty in-memory registry with default configuration.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl<F: Flavor> Default for ConfirmationRegistry<F, MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flavor, S: ConfirmationStore> ConfirmationRegistry<F, S> {
    pub fn with_store(store: S, config: RegistryConfig) -> Self {
        Self {
            store,
            config,
            events: EventBus::new(),
            _flavor: PhantomData,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Register an observer for every subsequent state change.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&RegistryEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Assert that `provider` should hold the content behind `hash`.
    ///
    /// The caller is the claimant. Its first mapping for `provider` appends a
    /// pending record; later mappings overwrite that same record's hash and
    /// reset it to pending. Re-submitting the hash the record already holds,
    /// pending or verified, fails with [`RegistryError::DuplicateMapping`].
    pub fn map_claimant_to_hash(
        &mut self,
        caller: &AuthenticatedCaller,
        hash: ContentHash,
        provider: &Identity,
    ) -> Result<MapOutcome, RegistryError> {
        caller.ensure_usable()?;
        if !provider.is_valid() {
            return Err(RegistryError::InvalidProvider(provider.to_string()));
        }
        if caller.identity() == provider {
            return Err(RegistryError::Unauthorized {
                caller: caller.to_string(),
                reason: "a provider cannot assert content it must itself prove",
            });
        }

        let claimant = caller.identity();
        let mut ledger = self.store.get_ledger(provider)?;

        let outcome = match ledger.position_of(claimant) {
            None => {
                let index = ledger.push(Confirmation::pending(claimant.clone(), hash))?;
                MapOutcome::Created { index }
            }
            Some(index) => {
                let record = ledger
                    .record_mut(index)
                    .ok_or_else(|| index_out_of_bounds(provider, index))?;
                if record.hash == hash {
                    tracing::warn!(
                        flavor = %F::KIND,
                        claimant = %claimant,
                        provider = %provider,
                        hash = %hash,
                        "duplicate mapping rejected"
                    );
                    return Err(RegistryError::DuplicateMapping {
                        claimant: claimant.clone(),
                        provider: provider.clone(),
                        hash,
                    });
                }
                let previous = std::mem::replace(&mut record.hash, hash);
                let was_verified = std::mem::replace(&mut record.verified, false);
                MapOutcome::Updated {
                    index,
                    previous,
                    was_verified,
                }
            }
        };

        self.store.put_ledger(provider, ledger)?;

        let created = matches!(outcome, MapOutcome::Created { .. });
        tracing::debug!(
            flavor = %F::KIND,
            claimant = %claimant,
            provider = %provider,
            hash = %hash,
            created,
            "{} confirmation mapped",
            F::PAYLOAD
        );
        self.publish(RegistryEvent::Mapped {
            flavor: F::KIND,
            claimant: claimant.clone(),
            provider: provider.clone(),
            hash,
            created,
        });
        Ok(outcome)
    }

    /// Prove possession: the caller is the provider, and `hash` is what it
    /// computed over the payload it received.
    ///
    /// Only the caller's own ledger is searched. The first pending record, in
    /// insertion order, holding exactly `hash` becomes verified. Anything else
    /// (a wrong hash, an already verified record) returns
    /// [`VerifyOutcome::NoMatch`] without touching state.
    pub fn verify_hash(
        &mut self,
        caller: &AuthenticatedCaller,
        hash: ContentHash,
    ) -> Result<VerifyOutcome, RegistryError> {
        caller.ensure_usable()?;
        let provider = caller.identity();
        let mut ledger = self.store.get_ledger(provider)?;

        let Some(index) = ledger.first_pending_match(&hash) else {
            tracing::trace!(
                flavor = %F::KIND,
                provider = %provider,
                hash = %hash,
                "no pending confirmation matches submitted hash"
            );
            return Ok(VerifyOutcome::NoMatch);
        };

        let record = ledger
            .record_mut(index)
            .ok_or_else(|| index_out_of_bounds(provider, index))?;
        record.verified = true;
        let claimant = record.claimant.clone();
        self.store.put_ledger(provider, ledger)?;

        tracing::debug!(
            flavor = %F::KIND,
            claimant = %claimant,
            provider = %provider,
            hash = %hash,
            "{} possession verified",
            F::PAYLOAD
        );
        self.publish(RegistryEvent::Verified {
            flavor: F::KIND,
            provider: provider.clone(),
            claimant: claimant.clone(),
            hash,
        });
        Ok(VerifyOutcome::Verified { claimant, index })
    }

    /// Every confirmation held against `provider`, in insertion order.
    pub fn get_confirmations(&self, provider: &Identity) -> Result<Vec<Confirmation>, RegistryError> {
        Ok(self.store.get_ledger(provider)?.records().to_vec())
    }

    /// The claimant's confirmation for `provider`, if it has mapped one.
    pub fn confirmation_for(
        &self,
        claimant: &Identity,
        provider: &Identity,
    ) -> Result<Option<Confirmation>, RegistryError> {
        Ok(self.store.get_ledger(provider)?.get(claimant).cloned())
    }

    pub fn confirmation_count(&self, provider: &Identity) -> Result<usize, RegistryError> {
        Ok(self.store.get_ledger(provider)?.len())
    }

    pub fn is_verified(&self, claimant: &Identity, provider: &Identity) -> Result<bool, RegistryError> {
        Ok(self
            .confirmation_for(claimant, provider)?
            .is_some_and(|c| c.verified))
    }

    /// Providers with at least one confirmation.
    pub fn providers(&self) -> Result<Vec<Identity>, RegistryError> {
        Ok(self.store.providers()?)
    }

    fn publish(&self, event: RegistryEvent) {
        if self.config.emit_events {
            self.events.emit(&event);
        }
    }
}

/// A ledger position that its own lookup produced but cannot be dereferenced.
fn index_out_of_bounds(provider: &Identity, index: usize) -> RegistryError {
    StoreError::Corruption(format!(
        "ledger for {provider} has no record at position {index}"
    ))
    .into()
}

impl<S: ConfirmationStore> ConfirmationRegistry<Data, S> {
    pub fn map_provider_to_data(
        &mut self,
        caller: &AuthenticatedCaller,
        data_hash: ContentHash,
        provider: &Identity,
    ) -> Result<MapOutcome, RegistryError> {
        self.map_claimant_to_hash(caller, data_hash, provider)
    }

    pub fn verify_data_hash(
        &mut self,
        caller: &AuthenticatedCaller,
        data_hash: ContentHash,
    ) -> Result<VerifyOutcome, RegistryError> {
        self.verify_hash(caller, data_hash)
    }

    pub fn get_data_confirmations(
        &self,
        provider: &Identity,
    ) -> Result<Vec<Confirmation>, RegistryError> {
        self.get_confirmations(provider)
    }
}

impl<S: ConfirmationStore> ConfirmationRegistry<Model, S> {
    pub fn map_provider_to_model(
        &mut self,
        caller: &AuthenticatedCaller,
        model_hash: ContentHash,
        provider: &Identity,
    ) -> Result<MapOutcome, RegistryError> {
        self.map_claimant_to_hash(caller, model_hash, provider)
    }

    pub fn verify_model_hash(
        &mut self,
        caller: &AuthenticatedCaller,
        model_hash: ContentHash,
    ) -> Result<VerifyOutcome, RegistryError> {
        self.verify_hash(caller, model_hash)
    }

    pub fn get_model_confirmations(
        &self,
        provider: &Identity,
    ) -> Result<Vec<Confirmation>, RegistryError> {
        self.get_confirmations(provider)
    }
}
