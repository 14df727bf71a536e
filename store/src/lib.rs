//! Abstract storage for confirmation ledgers.
//!
//! Every backend implements [`ConfirmationStore`]. The registry depends only
//! on the trait; [`MemoryStore`] is the in-process backend used by the CLI and
//! by tests, and [`RegistrySnapshot`] persists its contents between runs.

pub mod confirmation;
pub mod error;
pub mod memory;
pub mod snapshot;

pub use confirmation::ConfirmationStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::{LedgerEntry, RegistrySnapshot};
