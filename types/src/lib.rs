//! Fundamental types for the PPML confirmation registry.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! content hashes, identities, confirmation records, and per-provider ledgers.

pub mod confirmation;
pub mod error;
pub mod hash;
pub mod identity;
pub mod ledger;

pub use confirmation::{Confirmation, ConfirmationState};
pub use error::TypesError;
pub use hash::ContentHash;
pub use identity::Identity;
pub use ledger::ProviderLedger;
