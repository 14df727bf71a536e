//! Confirmation registries for privacy-preserving ML pipelines.
//!
//! A data or model owner (the *claimant*) asserts that a cloud provider should
//! hold content with a given hash. The provider later proves possession by
//! resubmitting the hash it computed over what it actually received; the
//! registry marks the claim verified only on an exact match.
//!
//! One generic [`ConfirmationRegistry`] is instantiated twice:
//! [`DataConfirmation`] for raw data sets and [`ModelConfirmation`] for trained
//! models. The two share no state. [`Deployment`] provisions the pair.
//!
//! The registry never hashes payloads itself; it only compares the
//! [`ContentHash`](ppml_types::ContentHash) values it is given.

pub mod caller;
pub mod config;
pub mod deployment;
pub mod error;
pub mod event;
pub mod flavor;
pub mod registry;

pub use caller::AuthenticatedCaller;
pub use config::RegistryConfig;
pub use deployment::Deployment;
pub use error::RegistryError;
pub use event::{EventBus, RegistryEvent};
pub use flavor::{Data, DataConfirmation, Flavor, FlavorKind, Model, ModelConfirmation};
pub use registry::{ConfirmationRegistry, MapOutcome, VerifyOutcome};
