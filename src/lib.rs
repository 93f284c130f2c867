//! # merkle-levels
//!
//! A binary Merkle tree over an ordered sequence of inputs, with the digests of
//! every level kept for inspection.
//!
//! - **Left-skewed shape**: a range of `n` inputs splits at `ceil(n / 2)`, so
//!   any input count works without padding or duplicated leaves
//! - **Level access**: levels are numbered from 1 (the root) to
//!   [`MerkleTree::height`] (the deepest leaves); out-of-range levels are empty
//! - **Immutable**: a tree is built once and never changes
//! - **Parallel builds**: with the `parallel` feature, large inputs are split
//!   across the rayon pool
//!
//! ## Hash Function
//!
//! Leaves hash the raw input bytes. Internal nodes hash the lowercase hex text
//! of their two children, left first. SHA256 is the default, which makes roots
//! match the usual `sha256(hex(left) + hex(right))` construction; BLAKE3 is
//! available through [`Blake3Hasher`].
//!
//! ```
//! use merkle_levels::MerkleTree;
//!
//! let tree = MerkleTree::build(&["a", "b", "c"]).expect("inputs are not empty");
//!
//! assert_eq!(tree.height(), 3);
//! // the left half takes the extra input
//! assert_eq!(tree.level(3).len(), 2);
//! assert_eq!(tree.level(2).len(), 2);
//! assert!(tree.level(4).is_empty());
//!
//! let empty: [&str; 0] = [];
//! assert!(MerkleTree::build(&empty).is_none());
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
mod hash;
mod tree;

pub use error::{MerkleError, Result};
pub use hash::{to_hex, Blake3Hasher, Hasher, Sha256Hasher};
pub use tree::{MerkleTree, TreeBuilder, DEFAULT_PARALLEL_THRESHOLD};

/// Re-export the digest type for convenience
pub use alloy_primitives::B256;
