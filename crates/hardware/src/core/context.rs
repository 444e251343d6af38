//! Simulation context.
//!
//! Traffic that leaves the last cache level is not owned by any one level: a writeback
//! from L1 may turn into a memory write two levels down, and a stream buffer refill
//! counts against the same tally as a plain demand fetch. The context carries that
//! tally and is threaded by `&mut` through every read and write.

use serde::Serialize;

/// Mutable state shared by every level during one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimContext {
    memory_traffic: u64,
}

impl SimContext {
    /// Creates a context with no traffic recorded.
    pub const fn new() -> Self {
        Self { memory_traffic: 0 }
    }

    /// Records `blocks` block-sized transfers between the last level and main memory.
    #[inline]
    pub const fn record_memory_transfers(&mut self, blocks: u64) {
        self.memory_traffic += blocks;
    }

    /// Total block-sized transfers to and from main memory so far.
    #[inline]
    pub const fn memory_traffic(&self) -> u64 {
        self.memory_traffic
    }
}
