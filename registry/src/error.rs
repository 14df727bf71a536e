use ppml_store::StoreError;
use ppml_types::{ContentHash, Identity, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{claimant} already mapped {provider} to {hash}")]
    DuplicateMapping {
        claimant: Identity,
        provider: Identity,
        hash: ContentHash,
    },

    #[error("caller {caller:?} is not authorized: {reason}")]
    Unauthorized { caller: String, reason: &'static str },

    #[error("invalid provider identity: {0:?}")]
    InvalidProvider(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] TypesError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
