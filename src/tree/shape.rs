//! Shape of a left-skewed tree, derived from the leaf count alone.
//!
//! A range of `n >= 2` leaves splits at `ceil(n / 2)`: the left half takes the
//! extra leaf when `n` is odd. Every function here follows that rule, so the
//! builder, the validator and the leaf walk agree on where each node sits.

use std::ops::ControlFlow;

/// Number of leaves that go to the left half of a range of `len` leaves.
#[inline]
pub(crate) fn split_point(len: usize) -> usize {
    len.div_ceil(2)
}

/// Number of levels of a tree over `leaves` leaves: `ceil(log2(n)) + 1`.
///
/// Returns 0 for no leaves, since there is no tree.
pub(crate) fn height_for(leaves: usize) -> usize {
    if leaves == 0 {
        return 0;
    }
    (usize::BITS - (leaves - 1).leading_zeros()) as usize + 1
}

/// Number of digests at each depth, root first.
///
/// Subtrees at one depth only ever have two distinct sizes (`floor` and
/// `ceil` of `n / 2^depth`), so this tracks sizes with multiplicities instead
/// of visiting every node.
pub(crate) fn level_widths(leaves: usize) -> Vec<usize> {
    let mut widths = Vec::with_capacity(height_for(leaves));
    // (subtree size, number of subtrees of that size) at the current depth
    let mut sizes: Vec<(usize, usize)> = Vec::with_capacity(2);
    if leaves > 0 {
        sizes.push((leaves, 1));
    }

    while !sizes.is_empty() {
        widths.push(sizes.iter().map(|&(_, count)| count).sum());

        let mut next: Vec<(usize, usize)> = Vec::with_capacity(2);
        for &(size, count) in &sizes {
            if size < 2 {
                continue;
            }
            let left = split_point(size);
            for half in [left, size - left] {
                match next.iter_mut().find(|(s, _)| *s == half) {
                    Some((_, c)) => *c += count,
                    None => next.push((half, count)),
                }
            }
        }
        sizes = next;
    }

    widths
}

/// Location of a node: depth from the root and index within that depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodePos {
    pub depth: usize,
    pub index: usize,
}

/// A node reached by [`walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Visit {
    Leaf(NodePos),
    Internal {
        node: NodePos,
        left: NodePos,
        right: NodePos,
    },
}

/// Visit every node of the tree over `leaves` leaves, children before their
/// parent and left subtrees before right ones.
///
/// Leaves are therefore reported in input order. The walk stops at the first
/// `Break` returned by `visit`.
pub(crate) fn walk<B>(leaves: usize, mut visit: impl FnMut(Visit) -> ControlFlow<B>) -> ControlFlow<B> {
    if leaves == 0 {
        return ControlFlow::Continue(());
    }
    let mut cursors = vec![0usize; height_for(leaves)];
    walk_subtree(leaves, 0, &mut cursors, &mut visit)?;
    ControlFlow::Continue(())
}

fn walk_subtree<B, F>(
    size: usize,
    depth: usize,
    cursors: &mut [usize],
    visit: &mut F,
) -> ControlFlow<B, NodePos>
where
    F: FnMut(Visit) -> ControlFlow<B>,
{
    if size == 1 {
        let pos = next_pos(cursors, depth);
        visit(Visit::Leaf(pos))?;
        return ControlFlow::Continue(pos);
    }

    let split = split_point(size);
    let left = walk_subtree(split, depth + 1, cursors, visit)?;
    let right = walk_subtree(size - split, depth + 1, cursors, visit)?;

    let node = next_pos(cursors, depth);
    visit(Visit::Internal { node, left, right })?;
    ControlFlow::Continue(node)
}

fn next_pos(cursors: &mut [usize], depth: usize) -> NodePos {
    let index = cursors[depth];
    cursors[depth] += 1;
    NodePos { depth, index }
}
