//! Payload hashing for registry clients.
//!
//! The registry itself never hashes anything: owners and providers hash their
//! payloads off-registry and submit the resulting [`ContentHash`](ppml_types::ContentHash).
//! This crate is the hashing they are expected to share.

pub mod hash;

pub use hash::{blake2b_256, hash_payload};
