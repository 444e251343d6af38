//! Final Report.
//!
//! Renders the end-of-run output in five sections: the configuration banner, the
//! contents of each enabled level (ways most recently used first), the stream buffers
//! of the terminal level when prefetching is on, and the measurement list.

use std::fmt;

use crate::core::{CacheLevel, StreamPrefetcher};
use crate::sim::Simulator;

/// Display adapter over a finished simulation.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    sim: &'a Simulator,
    trace_file: &'a str,
}

impl<'a> Report<'a> {
    /// Creates a report for `sim`, naming `trace_file` in the banner.
    pub const fn new(sim: &'a Simulator, trace_file: &'a str) -> Self {
        Self { sim, trace_file }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.sim.config();
        let hierarchy = self.sim.hierarchy();

        writeln!(f, "===== Simulator configuration =====")?;
        writeln!(f, "BLOCKSIZE:  {}", config.block_size)?;
        writeln!(f, "L1_SIZE:    {}", config.l1.size_bytes)?;
        writeln!(f, "L1_ASSOC:   {}", config.l1.assoc)?;
        writeln!(f, "L2_SIZE:    {}", config.l2.size_bytes)?;
        writeln!(f, "L2_ASSOC:   {}", config.l2.assoc)?;
        writeln!(f, "PREF_N:     {}", config.prefetch.streams)?;
        writeln!(f, "PREF_M:     {}", config.prefetch.window)?;
        writeln!(f, "trace_file: {}", self.trace_file)?;
        writeln!(f)?;

        for level in hierarchy.levels() {
            writeln!(f, "===== L{} contents =====", level.level())?;
            write_contents(f, level)?;
            writeln!(f)?;
        }

        if let Some(prefetcher) = hierarchy.terminal().active_prefetcher() {
            writeln!(f, "===== Stream Buffer(s) contents =====")?;
            write_stream_buffers(f, prefetcher)?;
            writeln!(f)?;
        }

        writeln!(f, "===== Measurements =====")?;
        write!(f, "{}", self.sim.stats())
    }
}

fn write_contents(f: &mut fmt::Formatter<'_>, level: &CacheLevel) -> fmt::Result {
    for (index, ways) in level.sets_by_recency().enumerate() {
        write!(f, "set{index:7}:")?;
        for block in ways {
            if block.valid {
                let dirty = if block.dirty { "D" } else { " " };
                write!(f, "{:9x} {dirty}", block.tag)?;
            } else {
                write!(f, "{:9}", "")?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_stream_buffers(f: &mut fmt::Formatter<'_>, prefetcher: &StreamPrefetcher) -> fmt::Result {
    for window in prefetcher.buffers() {
        for block in window {
            write!(f, "{block:9x}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
