//! Main tree implementation.
//!
//! This module provides [`MerkleTree`], an immutable binary hash tree over an
//! ordered sequence of inputs, and [`TreeBuilder`], which constructs it.
//!
//! # Shape
//!
//! A range of `n >= 2` inputs splits at `ceil(n / 2)`, so for odd counts the
//! left half receives the extra input. Each half becomes a subtree and the two
//! subtree roots are hashed into their parent. With `n = 3`:
//!
//! ```text
//! level 1            root
//!                   /    \
//! level 2       H(ab)    H(c)
//!               /   \
//! level 3    H(a)   H(b)
//! ```
//!
//! Leaves of an unbalanced tree therefore sit on the deepest two levels. The
//! height is `ceil(log2(n)) + 1`.
//!
//! # Storage
//!
//! All digests live in one contiguous vector, root first, then each level left
//! to right. An offset table turns a level number into a slice.

mod build;
mod shape;
mod verify;

use alloy_primitives::B256;
use std::ops::ControlFlow;

use crate::{hash::to_hex, Hasher, Sha256Hasher};

pub use build::{TreeBuilder, DEFAULT_PARALLEL_THRESHOLD};

use shape::{NodePos, Visit};

/// Flat level storage.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Levels {
    /// Every digest, level by level, root first
    nodes: Vec<B256>,
    /// Start of each level in `nodes`, plus a final end marker
    offsets: Vec<usize>,
}

impl Levels {
    fn from_nested(levels: Vec<Vec<B256>>) -> Self {
        let mut nodes = Vec::with_capacity(levels.iter().map(Vec::len).sum());
        let mut offsets = Vec::with_capacity(levels.len() + 1);
        offsets.push(0);
        for level in levels {
            nodes.extend(level);
            offsets.push(nodes.len());
        }
        Self { nodes, offsets }
    }

    fn height(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Level at 0-based `depth`.
    fn at(&self, depth: usize) -> Option<&[B256]> {
        let start = *self.offsets.get(depth)?;
        let end = *self.offsets.get(depth + 1)?;
        Some(&self.nodes[start..end])
    }

    fn node(&self, pos: NodePos) -> Option<B256> {
        self.at(pos.depth)?.get(pos.index).copied()
    }

    fn iter(&self) -> impl ExactSizeIterator<Item = &[B256]> + '_ {
        self.offsets
            .windows(2)
            .map(move |bounds| &self.nodes[bounds[0]..bounds[1]])
    }
}

/// An immutable Merkle tree.
///
/// Levels are numbered from 1 (the root) to [`height`](Self::height) (the
/// deepest leaves). The tree is never empty: building from no inputs yields
/// no tree at all.
///
/// A finished tree is never mutated, so it can be shared freely between
/// threads.
///
/// # Example
/// ```
/// use merkle_levels::MerkleTree;
///
/// let tree = MerkleTree::build(&["a", "b"]).expect("inputs are not empty");
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.level(2).len(), 2);
/// assert!(tree.level(3).is_empty());
/// assert_eq!(
///     tree.root_hex(),
///     "62af5c3cb8da3e4f25061e829ebeea5c7513c54949115b1acc225930a90154da"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct MerkleTree<H: Hasher = Sha256Hasher> {
    levels: Levels,
    hasher: H,
}

impl<H: Hasher> PartialEq for MerkleTree<H> {
    fn eq(&self, other: &Self) -> bool {
        self.levels == other.levels
    }
}

impl<H: Hasher> Eq for MerkleTree<H> {}

impl MerkleTree {
    /// Build a SHA256 tree over `inputs`.
    ///
    /// Returns `None` when `inputs` is empty.
    pub fn build<T>(inputs: &[T]) -> Option<Self>
    where
        T: AsRef<[u8]> + Sync,
    {
        TreeBuilder::new().build(inputs)
    }
}

impl<H: Hasher> MerkleTree<H> {
    /// Build a tree over `inputs` with a custom hasher.
    ///
    /// Returns `None` when `inputs` is empty.
    pub fn build_with_hasher<T>(inputs: &[T], hasher: H) -> Option<Self>
    where
        T: AsRef<[u8]> + Sync,
    {
        TreeBuilder::with_hasher(hasher).build(inputs)
    }

    fn from_parts(levels: Levels, hasher: H) -> Self {
        Self { levels, hasher }
    }

    /// Root digest.
    pub fn root(&self) -> B256 {
        self.levels.nodes[0]
    }

    /// Root digest as lowercase hex.
    pub fn root_hex(&self) -> String {
        to_hex(&self.root())
    }

    /// Number of levels, root and leaves included.
    pub fn height(&self) -> usize {
        self.levels.height()
    }

    /// Digests at 1-based level `index`, left to right.
    ///
    /// Any index outside `1..=height()` yields an empty slice.
    pub fn level(&self, index: usize) -> &[B256] {
        index
            .checked_sub(1)
            .and_then(|depth| self.levels.at(depth))
            .unwrap_or(&[])
    }

    /// [`level`](Self::level) rendered as lowercase hex.
    pub fn level_hex(&self, index: usize) -> Vec<String> {
        self.level(index).iter().map(to_hex).collect()
    }

    /// All levels, root first.
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &[B256]> + '_ {
        self.levels.iter()
    }

    /// Number of inputs the tree was built from.
    pub fn leaf_count(&self) -> usize {
        // every internal node has two children
        self.node_count().div_ceil(2)
    }

    /// Number of digests across all levels.
    pub fn node_count(&self) -> usize {
        self.levels.nodes.len()
    }

    /// Leaf digests in input order.
    ///
    /// For a power-of-two input count this is the deepest level. Otherwise
    /// leaves are spread over the deepest two levels and are collected from
    /// both.
    pub fn leaves(&self) -> Vec<B256> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        let _ = shape::walk::<()>(self.leaf_count(), |visit| {
            if let Visit::Leaf(pos) = visit {
                leaves.extend(self.levels.node(pos));
            }
            ControlFlow::Continue(())
        });
        leaves
    }

    /// The hasher the tree was built with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Take the levels out as nested vectors, root first.
    ///
    /// [`MerkleTree::from_levels`] accepts the result.
    pub fn into_levels(self) -> Vec<Vec<B256>> {
        self.levels.iter().map(<[B256]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blake3Hasher;

    fn hash(input: &str) -> B256 {
        Sha256Hasher.hash_leaf(input.as_bytes())
    }

    fn pair(left: &B256, right: &B256) -> B256 {
        Sha256Hasher.hash_pair(left, right)
    }

    #[test]
    fn test_empty_input() {
        let inputs: Vec<String> = vec![];
        assert!(MerkleTree::build(&inputs).is_none());
    }

    #[test]
    fn test_single_input() {
        let tree = MerkleTree::build(&["input"]).unwrap();
        let leaf = hash("input");

        assert_eq!(tree.root(), leaf);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.level(1), &[leaf]);
        assert!(tree.level(2).is_empty());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.leaves(), vec![leaf]);
    }

    #[test]
    fn test_single_empty_input_is_a_tree() {
        let tree = MerkleTree::build(&[""]).unwrap();
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root(), hash(""));
    }

    #[test]
    fn test_two_inputs() {
        let tree = MerkleTree::build(&["input1", "input2"]).unwrap();
        let (h1, h2) = (hash("input1"), hash("input2"));
        let root = pair(&h1, &h2);

        assert_eq!(tree.root(), root);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.level(1), &[root]);
        assert_eq!(tree.level(2), &[h1, h2]);
        assert!(tree.level(3).is_empty());
    }

    #[test]
    fn test_four_inputs() {
        let inputs = ["input1", "input2", "input3", "input4"];
        let tree = MerkleTree::build(&inputs).unwrap();

        let leaves: Vec<B256> = inputs.iter().map(|i| hash(i)).collect();
        let middle = vec![pair(&leaves[0], &leaves[1]), pair(&leaves[2], &leaves[3])];
        let root = pair(&middle[0], &middle[1]);

        assert_eq!(tree.root(), root);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.level(1), &[root]);
        assert_eq!(tree.level(2), middle.as_slice());
        assert_eq!(tree.level(3), leaves.as_slice());
        assert!(tree.level(4).is_empty());
    }

    #[test]
    fn test_three_inputs_skew_left() {
        let tree = MerkleTree::build(&["input1", "input2", "input3"]).unwrap();
        let (h1, h2, h3) = (hash("input1"), hash("input2"), hash("input3"));
        let h12 = pair(&h1, &h2);

        assert_eq!(tree.height(), 3);
        assert_eq!(tree.level(3), &[h1, h2]);
        assert_eq!(tree.level(2), &[h12, h3]);
        assert_eq!(tree.root(), pair(&h12, &h3));
        assert_eq!(tree.leaves(), vec![h1, h2, h3]);
    }

    #[test]
    fn test_level_zero_is_empty() {
        let tree = MerkleTree::build(&["a", "b"]).unwrap();
        assert!(tree.level(0).is_empty());
        assert!(tree.level(usize::MAX).is_empty());
    }

    #[test]
    fn test_hex_views() {
        let tree = MerkleTree::build(&["a"]).unwrap();
        let hex = "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb";
        assert_eq!(tree.root_hex(), hex);
        assert_eq!(tree.level_hex(1), vec![hex.to_string()]);
        assert!(tree.level_hex(2).is_empty());
    }

    #[test]
    fn test_levels_iterator() {
        let tree = MerkleTree::build(&["a", "b", "c", "d", "e"]).unwrap();
        let widths: Vec<usize> = tree.levels().map(<[B256]>::len).collect();
        assert_eq!(widths, vec![1, 2, 4, 2]);
        assert_eq!(tree.levels().len(), tree.height());
        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.leaf_count(), 5);
    }

    #[test]
    fn test_leaves_in_input_order() {
        let inputs: Vec<String> = (0..13).map(|i| format!("leaf-{i}")).collect();
        let tree = MerkleTree::build(&inputs).unwrap();
        let expected: Vec<B256> = inputs.iter().map(|i| hash(i)).collect();
        assert_eq!(tree.leaves(), expected);
    }

    #[test]
    fn test_custom_hasher() {
        let tree = MerkleTree::build_with_hasher(&["a", "b"], Blake3Hasher).unwrap();
        let a = Blake3Hasher.hash_leaf(b"a");
        let b = Blake3Hasher.hash_leaf(b"b");
        assert_eq!(tree.root(), Blake3Hasher.hash_pair(&a, &b));
        assert_ne!(tree.root(), MerkleTree::build(&["a", "b"]).unwrap().root());
    }

    #[test]
    fn test_into_levels() {
        let tree = MerkleTree::build(&["a", "b", "c"]).unwrap();
        let root = tree.root();
        let levels = tree.clone().into_levels();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], vec![root]);
        assert_eq!(levels[2], tree.level(3).to_vec());
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MerkleTree>();
        assert_send_sync::<MerkleTree<Blake3Hasher>>();
    }
}
