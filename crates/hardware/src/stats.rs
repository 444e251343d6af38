//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters the hierarchy accumulates during a replay. It provides:
//! 1. **Per-level counters:** Reads, writes, their misses, writebacks, and prefetch traffic.
//! 2. **Derived rates:** Overall miss rate and demand-read miss rate.
//! 3. **Run summary:** The lettered measurement list (a. through q.) and a JSON form.

use std::fmt;

use serde::Serialize;

use crate::core::CacheHierarchy;

/// Counters accumulated by one cache level.
///
/// All counters only ever increase during a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Reads received, from the driver or from the level above.
    pub reads: u64,
    /// Reads that had to be fetched from below. Reads supplied by a stream
    /// buffer are not counted.
    pub read_misses: u64,
    /// Writes received, from the driver or as writebacks from the level above.
    pub writes: u64,
    /// Writes that had to allocate a block fetched from below. Writes supplied
    /// by a stream buffer are not counted.
    pub write_misses: u64,
    /// Dirty blocks written back to the next level or to memory.
    pub writebacks: u64,
    /// Blocks fetched by the stream-buffer prefetcher.
    pub prefetches: u64,
    /// Reads issued to this level by a prefetcher above it.
    pub prefetch_reads: u64,
    /// Prefetcher-issued reads that missed in this level.
    pub prefetch_read_misses: u64,
}

impl LevelStats {
    /// Reads plus writes.
    #[inline]
    pub const fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// Read misses plus write misses.
    #[inline]
    pub const fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Fraction of all accesses that missed; 0 when there were no accesses.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses(), self.accesses())
    }

    /// Fraction of demand reads that missed; 0 when there were no reads.
    pub fn read_miss_rate(&self) -> f64 {
        ratio(self.read_misses, self.reads)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Summary of a complete replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// First-level counters.
    pub l1: LevelStats,
    /// Second-level counters; all zero when L2 is disabled.
    pub l2: LevelStats,
    /// Whether L2 took part in the run.
    pub l2_enabled: bool,
    /// Block-sized transfers to and from main memory, including prefetches.
    pub memory_traffic: u64,
    /// L1 miss rate over all accesses.
    pub l1_miss_rate: f64,
    /// L2 miss rate over demand reads; 0 when L2 is disabled.
    pub l2_miss_rate: f64,
}

impl SimStats {
    /// Collects the counters of levels 1 and 2 from `hierarchy`.
    pub fn collect(hierarchy: &CacheHierarchy) -> Self {
        let stats_of = |number| {
            hierarchy
                .level(number)
                .map(|level| (level.enabled(), *level.stats()))
                .unwrap_or_default()
        };
        let (_, l1) = stats_of(1);
        let (l2_enabled, l2) = stats_of(2);

        Self {
            l1,
            l2,
            l2_enabled,
            memory_traffic: hierarchy.memory_traffic(),
            l1_miss_rate: l1.miss_rate(),
            l2_miss_rate: if l2_enabled { l2.read_miss_rate() } else { 0.0 },
        }
    }

    /// Renders the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot occur for this plain data type
    /// in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the measurement list to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimStats {
    /// Writes the lettered measurement list, one `x. label value` line per counter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counters = [
            ("a", "L1 reads: ", self.l1.reads),
            ("b", "L1 read misses: ", self.l1.read_misses),
            ("c", "L1 writes: ", self.l1.writes),
            ("d", "L1 write misses: ", self.l1.write_misses),
        ];
        for (tag, label, value) in counters {
            writeln!(f, "{tag}. {label:<30} {value}")?;
        }
        writeln!(f, "e. {:<30} {:.4}", "L1 miss rate: ", self.l1_miss_rate)?;

        let counters = [
            ("f", "L1 writebacks: ", self.l1.writebacks),
            ("g", "L1 prefetches: ", self.l1.prefetches),
            ("h", "L2 reads (demand): ", self.l2.reads),
            ("i", "L2 read misses (demand): ", self.l2.read_misses),
            ("j", "L2 reads (prefetch): ", self.l2.prefetch_reads),
            ("k", "L2 read misses (prefetch): ", self.l2.prefetch_read_misses),
            ("l", "L2 writes: ", self.l2.writes),
            ("m", "L2 write misses: ", self.l2.write_misses),
        ];
        for (tag, label, value) in counters {
            writeln!(f, "{tag}. {label:<30} {value}")?;
        }
        writeln!(f, "n. {:<30} {:.4}", "L2 miss rate: ", self.l2_miss_rate)?;
        writeln!(f, "o. {:<30} {}", "L2 writebacks: ", self.l2.writebacks)?;
        writeln!(f, "p. {:<30} {}", "L2 prefetches: ", self.l2.prefetches)?;
        writeln!(f, "q. {:<30} {}", "memory traffic: ", self.memory_traffic)
    }
}
