//! LRU Rank Tests.
//!
//! Exercises `touch` and `victim` on bare sets, independent of any cache level.
//! Ranks: 0 = most recently used, `ways - 1` = next victim.

use cachesim_core::core::CacheBlock;
use cachesim_core::core::units::cache::lru;

fn fresh_set(ways: usize) -> Vec<CacheBlock> {
    let mut set = vec![CacheBlock::default(); ways];
    lru::reset(&mut set);
    set
}

fn ranks(set: &[CacheBlock]) -> Vec<u32> {
    set.iter().map(|b| b.recency).collect()
}

/// A fresh set ranks ways in storage order, so the last way goes first.
#[test]
fn reset_ranks_in_storage_order() {
    let set = fresh_set(4);
    assert_eq!(ranks(&set), vec![0, 1, 2, 3]);
    assert_eq!(lru::victim(&set), 3);
}

/// Only ways that were more recent than the touched way age.
#[test]
fn touch_ages_only_more_recent_ways() {
    let mut set = fresh_set(4);
    lru::touch(&mut set, 2);
    assert_eq!(ranks(&set), vec![1, 2, 0, 3]);
    assert_eq!(lru::victim(&set), 3);
}

/// Touching the LRU way ages every other way, as a placement does.
#[test]
fn touching_victim_ages_everyone() {
    let mut set = fresh_set(4);
    lru::touch(&mut set, 3);
    assert_eq!(ranks(&set), vec![1, 2, 3, 0]);
    assert_eq!(lru::victim(&set), 2);
}

/// Touching the MRU way changes nothing.
#[test]
fn touching_mru_is_idempotent() {
    let mut set = fresh_set(4);
    lru::touch(&mut set, 0);
    assert_eq!(ranks(&set), vec![0, 1, 2, 3]);
}

/// Classic sequence: touch 0..4 in order, then re-touch 0; way 1 becomes LRU.
#[test]
fn victim_tracks_true_lru() {
    let mut set = fresh_set(4);
    for way in 0..4 {
        lru::touch(&mut set, way);
    }
    assert_eq!(lru::victim(&set), 0);

    lru::touch(&mut set, 0);
    assert_eq!(lru::victim(&set), 1);
    assert_eq!(ranks(&set), vec![0, 3, 2, 1]);
}

#[test]
fn direct_mapped_set() {
    let mut set = fresh_set(1);
    assert_eq!(lru::victim(&set), 0);
    lru::touch(&mut set, 0);
    assert_eq!(ranks(&set), vec![0]);
    assert_eq!(lru::victim(&set), 0);
}
