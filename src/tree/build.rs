//! Tree construction.

use alloy_primitives::B256;
use tracing::debug;
#[cfg(feature = "parallel")]
use tracing::trace;

use crate::{Hasher, MerkleTree, Sha256Hasher};

use super::{
    shape::{level_widths, split_point},
    Levels,
};

/// Leaf count above which a build forks its two halves onto the rayon pool.
///
/// Only used when the `parallel` feature is enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 12;

/// Builds [`MerkleTree`]s from ordered inputs.
///
/// Holds the hasher and the build settings; a builder can be reused for any
/// number of trees.
///
/// # Example
/// ```
/// use merkle_levels::{Blake3Hasher, TreeBuilder};
///
/// let builder = TreeBuilder::with_hasher(Blake3Hasher).parallel_threshold(1 << 16);
/// let tree = builder.build(&["a", "b", "c"]).expect("inputs are not empty");
/// assert_eq!(tree.height(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct TreeBuilder<H: Hasher = Sha256Hasher> {
    hasher: H,
    parallel_threshold: usize,
}

impl<H: Hasher> Default for TreeBuilder<H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl TreeBuilder {
    /// Create a builder using SHA256.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: Hasher> TreeBuilder<H> {
    /// Create a builder with a custom hasher.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the leaf count above which the two halves of a build run in
    /// parallel. Values below 2 are raised to 2.
    ///
    /// Has no effect without the `parallel` feature.
    #[must_use]
    pub fn parallel_threshold(mut self, leaves: usize) -> Self {
        self.parallel_threshold = leaves.max(2);
        self
    }

    /// The hasher trees are built with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Build a tree over `inputs`, in order.
    ///
    /// Returns `None` for an empty input sequence. A single input, even an
    /// empty one, yields a one-level tree.
    pub fn build<T>(&self, inputs: &[T]) -> Option<MerkleTree<H>>
    where
        T: AsRef<[u8]> + Sync,
    {
        if inputs.is_empty() {
            return None;
        }

        let levels = self.build_levels(inputs);
        let tree = MerkleTree::from_parts(Levels::from_nested(levels), self.hasher.clone());

        debug!(
            leaves = inputs.len(),
            height = tree.height(),
            parallel = cfg!(feature = "parallel") && inputs.len() > self.parallel_threshold,
            "built merkle tree"
        );
        Some(tree)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_levels<T>(&self, inputs: &[T]) -> Vec<Vec<B256>>
    where
        T: AsRef<[u8]> + Sync,
    {
        self.build_sequential(inputs)
    }

    /// Build both halves on the rayon pool, then merge them left before right.
    #[cfg(feature = "parallel")]
    fn build_levels<T>(&self, inputs: &[T]) -> Vec<Vec<B256>>
    where
        T: AsRef<[u8]> + Sync,
    {
        if inputs.len() <= self.parallel_threshold {
            return self.build_sequential(inputs);
        }

        let (left, right) = inputs.split_at(split_point(inputs.len()));
        trace!(left = left.len(), right = right.len(), "forking subtree builds");

        let (left, right) = rayon::join(|| self.build_levels(left), || self.build_levels(right));
        merge_levels(&self.hasher, left, right)
    }

    /// Build levels with a single left-first walk.
    ///
    /// Each node is appended to its depth once both children are known. All of
    /// a left subtree is finished before its right sibling starts, so every
    /// depth fills left to right: the same lists `merge_levels` would
    /// produce, without the intermediate copies.
    fn build_sequential<T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<Vec<B256>> {
        let mut levels: Vec<Vec<B256>> = level_widths(inputs.len())
            .into_iter()
            .map(Vec::with_capacity)
            .collect();
        self.fill(inputs, 0, &mut levels);
        levels
    }

    fn fill<T: AsRef<[u8]>>(&self, inputs: &[T], depth: usize, levels: &mut [Vec<B256>]) -> B256 {
        let digest = if let [input] = inputs {
            self.hasher.hash_leaf(input.as_ref())
        } else {
            let (left, right) = inputs.split_at(split_point(inputs.len()));
            let left = self.fill(left, depth + 1, levels);
            let right = self.fill(right, depth + 1, levels);
            self.hasher.hash_pair(&left, &right)
        };
        levels[depth].push(digest);
        digest
    }
}

/// Join two subtrees under a new root.
///
/// The result starts with the new root; every deeper level is the left
/// subtree's level at that depth followed by the right subtree's. Depths only
/// one side reaches take that side's digests alone.
///
/// Both level lists must be non-empty, subtree root first.
///
/// Parallel builds join their halves with this; the sequential walk produces
/// the same lists directly and tests pin the two against each other.
#[cfg(any(test, feature = "parallel"))]
pub(super) fn merge_levels<H: Hasher>(
    hasher: &H,
    left: Vec<Vec<B256>>,
    right: Vec<Vec<B256>>,
) -> Vec<Vec<B256>> {
    let root = hasher.hash_pair(&left[0][0], &right[0][0]);

    let mut merged = Vec::with_capacity(1 + left.len().max(right.len()));
    merged.push(vec![root]);

    let mut right = right.into_iter();
    for mut level in left {
        if let Some(other) = right.next() {
            level.extend(other);
        }
        merged.push(level);
    }
    merged.extend(right);
    merged
}
