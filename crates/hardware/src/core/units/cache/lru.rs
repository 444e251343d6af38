//! Least Recently Used (LRU) recency ranks.
//!
//! Each way of a set carries a rank in `0..ways`: 0 is the most recently used way,
//! `ways - 1` the least recently used one and the next eviction candidate. The ranks
//! of a set always form a permutation of `0..ways`, whether or not the ways hold
//! valid blocks.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(W) where W is the number of ways (associativity)
//!   - `victim()`: O(W)
//! - **Space Complexity:** one rank per way, stored inline in the block
//! - **Hardware Cost:** High - requires a full comparator per way

use super::CacheBlock;

/// Assigns ranks `0..ways` to a freshly created set, way 0 first.
pub fn reset(set: &mut [CacheBlock]) {
    for (rank, block) in (0u32..).zip(set.iter_mut()) {
        block.recency = rank;
    }
}

/// Promotes `way` to most recently used.
///
/// Only the ways ranked above the touched way age by one; ways that were already
/// older keep their rank, so the permutation is preserved. Touching the current
/// LRU way ages every other way.
pub fn touch(set: &mut [CacheBlock], way: usize) {
    let old = set[way].recency;
    for block in set.iter_mut() {
        if block.recency < old {
            block.recency += 1;
        }
    }
    set[way].recency = 0;
}

/// Returns the way holding the highest rank, which is the eviction candidate.
pub fn victim(set: &[CacheBlock]) -> usize {
    let lru = set.len().saturating_sub(1);
    // Ranks are a permutation, so the search always succeeds.
    set.iter()
        .position(|block| block.recency as usize == lru)
        .unwrap_or(lru)
}
