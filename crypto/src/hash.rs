//! Blake2b hashing for data sets and model payloads.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ppml_types::ContentHash;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash a data set or serialized model into the value submitted to the registry.
pub fn hash_payload(payload: &[u8]) -> ContentHash {
    ContentHash::new(blake2b_256(payload))
}
