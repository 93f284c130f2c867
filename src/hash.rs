//! Hash function abstraction for the tree.
//!
//! Leaves hash the raw input bytes. Internal nodes hash the lowercase hex text
//! of both children, left first, so a root computed here matches one computed
//! by any implementation that concatenates hex digest strings.

use alloy_primitives::{hex, B256};
use sha2::{Digest, Sha256};

/// Trait for hash functions used to build a [`MerkleTree`](crate::MerkleTree).
///
/// Implementations must be deterministic and side-effect free.
///
/// # Thread Safety
///
/// This trait is always `Send + Sync` so that hashers can be shared by both
/// halves of a build running under the `"parallel"` feature.
pub trait Hasher: Clone + Default + Send + Sync {
    /// Raw hash of arbitrary input
    fn hash_raw(&self, input: &[u8]) -> B256;

    /// Hash one input element into a leaf digest.
    fn hash_leaf(&self, input: &[u8]) -> B256 {
        self.hash_raw(input)
    }

    /// Hash for internal nodes: `hash(hex(left) || hex(right))`
    fn hash_pair(&self, left: &B256, right: &B256) -> B256 {
        self.hash_raw(&hex_pair(left, right))
    }
}

/// `hex(left) || hex(right)`, encoded on the stack.
fn hex_pair(left: &B256, right: &B256) -> [u8; 128] {
    let mut text = [0u8; 128];
    let (left_hex, right_hex) = text.split_at_mut(64);
    // each half is exactly twice the digest length, the only failure case
    let encoded = hex::encode_to_slice(left, left_hex)
        .and_then(|()| hex::encode_to_slice(right, right_hex));
    debug_assert!(encoded.is_ok());
    text
}

/// Lowercase hex text of a digest, without a `0x` prefix.
pub fn to_hex(digest: &B256) -> String {
    hex::encode(digest)
}

/// SHA256-based hasher.
///
/// This is the default hasher; its digests are the familiar `sha256` hex
/// strings.
#[derive(Clone, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash_raw(&self, input: &[u8]) -> B256 {
        B256::from_slice(&Sha256::digest(input))
    }

    fn hash_pair(&self, left: &B256, right: &B256) -> B256 {
        B256::from_slice(&Sha256::digest(hex_pair(left, right)))
    }
}

/// BLAKE3-based hasher.
#[derive(Clone, Debug, Default)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn hash_raw(&self, input: &[u8]) -> B256 {
        B256::from_slice(blake3::hash(input).as_bytes())
    }

    fn hash_pair(&self, left: &B256, right: &B256) -> B256 {
        B256::from_slice(blake3::hash(&hex_pair(left, right)).as_bytes())
    }
}
