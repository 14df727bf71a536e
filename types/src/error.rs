//! Errors raised while constructing or decoding core types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid content hash: {0}")]
    InvalidHash(String),

    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    #[error("claimant {0} already has a confirmation in this ledger")]
    DuplicateClaimant(String),
}
