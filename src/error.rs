//! Error types for the merkle-levels crate.

use thiserror::Error;

/// Errors reported when validating a level structure.
///
/// Level numbers are 1-based, matching [`MerkleTree::level`](crate::MerkleTree::level).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// No levels were supplied
    #[error("level structure is empty")]
    EmptyLevels,

    /// The first level must hold exactly the root
    #[error("root level must hold exactly one digest, got {0}")]
    RootLevelWidth(usize),

    /// Number of levels does not fit the inferred leaf count
    #[error("expected {expected} levels, got {actual}")]
    HeightMismatch { expected: usize, actual: usize },

    /// A level holds the wrong number of digests for the inferred leaf count
    #[error("level {level} should hold {expected} digests, got {actual}")]
    LevelWidthMismatch {
        level: usize,
        expected: usize,
        actual: usize,
    },

    /// An internal digest is not the hash of its children
    #[error("digest {index} at level {level} does not match its children")]
    NodeMismatch { level: usize, index: usize },
}

/// Result type alias for tree validation.
pub type Result<T> = std::result::Result<T, MerkleError>;
