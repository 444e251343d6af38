//! Hardware units of the memory hierarchy.

/// Set-associative cache level with LRU replacement and write-back/write-allocate policy.
pub mod cache;

/// Stream-buffer prefetcher for the last cache level.
pub mod prefetch;
