//! Cache hierarchy core.
//!
//! This module contains everything with algorithmic content in the simulator:
//! 1. **Units:** The set-associative cache level and the stream-buffer prefetcher.
//! 2. **Hierarchy:** The owned chain of levels requests enter through.
//! 3. **Context:** State shared by all levels of one run (main-memory traffic).

/// Simulation context shared across levels.
pub mod context;

/// Chain of cache levels.
pub mod hierarchy;

/// Cache and prefetch units.
pub mod units;

pub use context::SimContext;
pub use hierarchy::CacheHierarchy;
pub use units::cache::{CacheBlock, CacheLevel};
pub use units::prefetch::{StreamEvent, StreamPrefetcher};
