//! Structural validation of level data.

use alloy_primitives::B256;
use std::ops::ControlFlow;

use crate::{error::Result, Hasher, MerkleError, MerkleTree};

use super::{
    shape::{self, level_widths, Visit},
    Levels,
};

impl<H: Hasher> MerkleTree<H> {
    /// Rebuild a tree from nested levels, root first, as produced by
    /// [`MerkleTree::into_levels`].
    ///
    /// The leaf count is inferred from the total number of digests. The level
    /// widths must match the left-skewed shape for that count, and every
    /// internal digest must be the hash of its children under `hasher`.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found; see [`MerkleError`].
    pub fn from_levels(levels: Vec<Vec<B256>>, hasher: H) -> Result<Self> {
        let root_width = levels.first().map(Vec::len).ok_or(MerkleError::EmptyLevels)?;
        if root_width != 1 {
            return Err(MerkleError::RootLevelWidth(root_width));
        }

        let node_count: usize = levels.iter().map(Vec::len).sum();
        let expected = level_widths(node_count.div_ceil(2));
        if expected.len() != levels.len() {
            return Err(MerkleError::HeightMismatch {
                expected: expected.len(),
                actual: levels.len(),
            });
        }

        for (depth, (level, &width)) in levels.iter().zip(&expected).enumerate() {
            if level.len() != width {
                return Err(MerkleError::LevelWidthMismatch {
                    level: depth + 1,
                    expected: width,
                    actual: level.len(),
                });
            }
        }

        let tree = Self::from_parts(Levels::from_nested(levels), hasher);
        tree.verify()?;
        Ok(tree)
    }

    /// Check that every internal digest is the hash of its two children.
    ///
    /// Trees from [`TreeBuilder`](crate::TreeBuilder) always pass.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::NodeMismatch`] for the first bad digest, deepest
    /// and leftmost first.
    pub fn verify(&self) -> Result<()> {
        let outcome = shape::walk(self.leaf_count(), |visit| {
            let Visit::Internal { node, left, right } = visit else {
                return ControlFlow::Continue(());
            };

            let children = self.levels.node(left).zip(self.levels.node(right));
            let matches = children.is_some_and(|(l, r)| {
                self.levels.node(node) == Some(self.hasher.hash_pair(&l, &r))
            });

            if matches {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(MerkleError::NodeMismatch {
                    level: node.depth + 1,
                    index: node.index,
                })
            }
        });

        match outcome {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(err) => Err(err),
        }
    }
}
