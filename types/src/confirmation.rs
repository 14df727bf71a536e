//! Confirmation records and their verification state.

use serde::{Deserialize, Serialize};

use crate::{ContentHash, Identity};

/// Lifecycle state of a [`Confirmation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationState {
    /// The provider has not yet resubmitted the asserted hash.
    Pending,
    /// The provider resubmitted a hash identical to the asserted one.
    Verified,
}

/// One claim that a provider should hold the content behind `hash`.
///
/// There is at most one confirmation per (claimant, provider) pair; the
/// provider is the key of the [`ProviderLedger`](crate::ProviderLedger) that
/// holds the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// The data or model owner that asserted the hash.
    pub claimant: Identity,
    /// The currently asserted content hash.
    pub hash: ContentHash,
    /// Set once the provider proves possession of `hash`.
    pub verified: bool,
}

impl Confirmation {
    /// A fresh, unverified confirmation.
    pub fn pending(claimant: Identity, hash: ContentHash) -> Self {
        Self {
            claimant,
            hash,
            verified: false,
        }
    }

    pub fn state(&self) -> ConfirmationState {
        if self.verified {
            ConfirmationState::Verified
        } else {
            ConfirmationState::Pending
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.verified
    }

    /// Whether a provider's resubmitted hash would verify this record.
    pub fn accepts_proof(&self, hash: &ContentHash) -> bool {
        self.is_pending() && self.hash == *hash
    }
}
