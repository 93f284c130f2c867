#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_levels::{MerkleTree, Sha256Hasher, B256};

/// Fuzz validation of arbitrary level data
/// Each chunk is a width byte followed by digest seeds; validation must reject
/// or accept without panicking, and accepted trees must round-trip
fuzz_target!(|data: &[u8]| {
    let mut levels: Vec<Vec<B256>> = Vec::new();
    let mut rest = data;
    while let Some((&width, tail)) = rest.split_first() {
        let width = (width as usize % 8).min(tail.len());
        let (seeds, tail) = tail.split_at(width);
        levels.push(seeds.iter().map(|&s| B256::repeat_byte(s)).collect());
        rest = tail;
    }

    if let Ok(tree) = MerkleTree::from_levels(levels.clone(), Sha256Hasher) {
        assert_eq!(tree.verify(), Ok(()));
        assert_eq!(tree.into_levels(), levels);
    }
});
