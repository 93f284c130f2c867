#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_levels::{Hasher, MerkleTree, Sha256Hasher};

/// Fuzz construction over arbitrary inputs
/// Splits data on 0x00 bytes and checks shape and hash invariants of the tree
fuzz_target!(|data: &[u8]| {
    let inputs: Vec<&[u8]> = data.split(|b| *b == 0).collect();

    let tree = MerkleTree::build(&inputs).expect("split always yields at least one input");

    let height = (inputs.len() as f64).log2().ceil() as usize + 1;
    assert_eq!(tree.height(), height);
    assert_eq!(tree.level(1), &[tree.root()]);
    assert!(tree.level(0).is_empty());
    assert!(tree.level(height + 1).is_empty());
    assert_eq!(tree.node_count(), 2 * inputs.len() - 1);

    let leaves: Vec<_> = inputs.iter().map(|i| Sha256Hasher.hash_leaf(i)).collect();
    assert_eq!(tree.leaves(), leaves, "leaf order mismatch");

    if height > 1 {
        let children = tree.level(2);
        assert_eq!(tree.root(), Sha256Hasher.hash_pair(&children[0], &children[1]));
    }

    tree.verify().expect("built trees always verify");
});
