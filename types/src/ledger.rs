//! Per-provider confirmation ledger.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Confirmation, ContentHash, Identity, TypesError};

/// The ordered confirmations held against one provider.
///
/// Records keep insertion order for reads and first-match verification.
/// A claimant index gives constant-time lookup for re-mappings; it is rebuilt
/// on deserialization and never serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Confirmation>", into = "Vec<Confirmation>")]
pub struct ProviderLedger {
    records: Vec<Confirmation>,
    by_claimant: HashMap<Identity, usize>,
}

impl ProviderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Confirmation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the claimant's record, if it has one.
    pub fn position_of(&self, claimant: &Identity) -> Option<usize> {
        self.by_claimant.get(claimant).copied()
    }

    pub fn get(&self, claimant: &Identity) -> Option<&Confirmation> {
        self.position_of(claimant).map(|i| &self.records[i])
    }

    pub fn get_mut(&mut self, claimant: &Identity) -> Option<&mut Confirmation> {
        let i = self.position_of(claimant)?;
        self.records.get_mut(i)
    }

    /// Append a record for a claimant that has none yet.
    ///
    /// Returns the new record's position.
    pub fn push(&mut self, confirmation: Confirmation) -> Result<usize, TypesError> {
        if self.by_claimant.contains_key(&confirmation.claimant) {
            return Err(TypesError::DuplicateClaimant(confirmation.claimant.to_string()));
        }
        let index = self.records.len();
        self.by_claimant.insert(confirmation.claimant.clone(), index);
        self.records.push(confirmation);
        Ok(index)
    }

    /// Position of the first pending record, in insertion order, whose hash
    /// equals `hash`.
    pub fn first_pending_match(&self, hash: &ContentHash) -> Option<usize> {
        self.records.iter().position(|c| c.accepts_proof(hash))
    }

    pub fn record_mut(&mut self, index: usize) -> Option<&mut Confirmation> {
        self.records.get_mut(index)
    }

    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|c| c.is_pending()).count()
    }
}

impl TryFrom<Vec<Confirmation>> for ProviderLedger {
    type Error = TypesError;

    fn try_from(records: Vec<Confirmation>) -> Result<Self, Self::Error> {
        let mut ledger = Self::new();
        for record in records {
            ledger.push(record)?;
        }
        Ok(ledger)
    }
}

impl From<ProviderLedger> for Vec<Confirmation> {
    fn from(ledger: ProviderLedger) -> Self {
        ledger.records
    }
}
