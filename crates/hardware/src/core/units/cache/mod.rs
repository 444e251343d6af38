//! Set-Associative Cache Level.
//!
//! This module implements one level of a write-back, write-allocate cache with strict
//! LRU replacement. A level may own the next level of the hierarchy; a level without
//! a successor is terminal and talks to main memory directly, optionally through a
//! stream-buffer prefetcher.
//!
//! Requests flow downward only:
//! - a miss at any level issues a **read** to the next level (writes allocate, so the
//!   block has to be fetched before it can be written);
//! - evicting a dirty block issues a **write** of that block to the next level;
//! - at the terminal level both turn into main-memory traffic instead.

/// LRU recency rank bookkeeping.
pub mod lru;

use tracing::{debug, trace};

use crate::common::{AccessKind, AddressLayout, ConfigError};
use crate::config::PrefetchConfig;
use crate::core::context::SimContext;
use crate::core::units::prefetch::{StreamEvent, StreamPrefetcher};
use crate::stats::LevelStats;

/// One way of a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheBlock {
    /// The way holds a block.
    pub valid: bool,
    /// The block was written since it was placed.
    pub dirty: bool,
    /// Tag of the block held in this way.
    pub tag: u32,
    /// LRU rank within the set; 0 is most recently used.
    pub recency: u32,
}

/// A single cache level.
///
/// Storage is a flat arena of `num_sets * ways` blocks; set `s` occupies
/// `blocks[s * ways..(s + 1) * ways]`. A level built with a size of 0 is disabled:
/// it allocates no storage, ignores accesses, and only its (zero) counters are
/// meaningful.
#[derive(Debug)]
pub struct CacheLevel {
    level: u32,
    ways: usize,
    block_size: u32,
    layout: Option<AddressLayout>,
    blocks: Vec<CacheBlock>,
    prefetcher: Option<StreamPrefetcher>,
    next: Option<Box<CacheLevel>>,
    stats: LevelStats,
}

impl CacheLevel {
    /// Creates cache level `level` with `size_bytes` of capacity split into
    /// `assoc`-way sets of `block_size`-byte blocks.
    ///
    /// The set count is `size_bytes / (assoc * block_size)`; index and block offset
    /// widths are its base-2 logarithms. The geometry is not validated here (see
    /// [`Config::validate`](crate::config::Config::validate)).
    ///
    /// A prefetcher is created when `prefetch.streams > 0`. It is only consulted
    /// while the level is terminal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefetchWindow`] if stream buffers are requested
    /// with a window of 0 blocks.
    ///
    /// # Panics
    ///
    /// For an enabled level, panics if `assoc * block_size` is zero or exceeds
    /// `size_bytes`, since no set can be formed.
    pub fn new(
        level: u32,
        size_bytes: u32,
        assoc: u32,
        block_size: u32,
        prefetch: PrefetchConfig,
    ) -> Result<Self, ConfigError> {
        prefetch.validate()?;

        if size_bytes == 0 {
            return Ok(Self {
                level,
                ways: 0,
                block_size,
                layout: None,
                blocks: Vec::new(),
                prefetcher: None,
                next: None,
                stats: LevelStats::default(),
            });
        }

        let num_sets = u64::from(size_bytes) / (u64::from(assoc) * u64::from(block_size));
        let layout = AddressLayout::new(block_size, num_sets as u32);
        let ways = assoc as usize;

        let mut blocks = vec![CacheBlock::default(); num_sets as usize * ways];
        for set in blocks.chunks_exact_mut(ways) {
            lru::reset(set);
        }

        let prefetcher = if prefetch.enabled() {
            Some(StreamPrefetcher::new(prefetch.streams, prefetch.window)?)
        } else {
            None
        };

        debug!(
            cache_level = level,
            size_bytes,
            ways,
            block_size,
            sets = num_sets,
            index_bits = layout.index_bits(),
            tag_bits = layout.tag_bits(),
            streams = prefetch.streams,
            window = prefetch.window,
            "cache level constructed"
        );

        Ok(Self {
            level,
            ways,
            block_size,
            layout: Some(layout),
            blocks,
            prefetcher,
            next: None,
            stats: LevelStats::default(),
        })
    }

    /// Makes `next` the successor of this level. This level stops being terminal.
    pub fn attach_next(&mut self, next: Self) {
        debug!(
            cache_level = self.level,
            next_level = next.level,
            "cache level wired"
        );
        self.next = Some(Box::new(next));
    }

    /// Level number (1-based).
    #[inline]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// `false` for a level built with zero capacity.
    #[inline]
    pub const fn enabled(&self) -> bool {
        self.layout.is_some()
    }

    /// Associativity (ways per set); 0 when disabled.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Number of sets; 0 when disabled.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.layout.map_or(0, |layout| layout.num_sets() as usize)
    }

    /// Address layout of this level, or `None` when disabled.
    #[inline]
    pub const fn layout(&self) -> Option<AddressLayout> {
        self.layout
    }

    /// The next level, if this level is not terminal.
    #[inline]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }

    /// A level with no successor is terminal: its misses and writebacks go to memory.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        self.next.is_none()
    }

    /// Counters accumulated by this level.
    #[inline]
    pub const fn stats(&self) -> &LevelStats {
        &self.stats
    }

    /// The prefetcher owned by this level, whether or not it is currently consulted.
    #[inline]
    pub const fn prefetcher(&self) -> Option<&StreamPrefetcher> {
        self.prefetcher.as_ref()
    }

    /// The prefetcher if it is in use, i.e. this level is terminal and owns one.
    #[inline]
    pub fn active_prefetcher(&self) -> Option<&StreamPrefetcher> {
        self.prefetcher.as_ref().filter(|_| self.is_terminal())
    }

    /// Handles a read of `addr` issued by the driver or by the level above.
    pub fn read(&mut self, addr: u32, ctx: &mut SimContext) {
        self.access(addr, AccessKind::Read, ctx);
    }

    /// Handles a write of `addr` issued by the driver or by a writeback from the level above.
    pub fn write(&mut self, addr: u32, ctx: &mut SimContext) {
        self.access(addr, AccessKind::Write, ctx);
    }

    /// Dispatches on `kind`.
    pub fn access(&mut self, addr: u32, kind: AccessKind, ctx: &mut SimContext) {
        let Some(layout) = self.layout else {
            return;
        };

        match kind {
            AccessKind::Read => self.stats.reads += 1,
            AccessKind::Write => self.stats.writes += 1,
        }

        let loc = layout.locate(addr);

        if let Some(way) = self.lookup(loc.set, loc.tag) {
            trace!(
                cache_level = self.level,
                %kind,
                addr,
                set = loc.set,
                tag = loc.tag,
                "hit"
            );
            if self.is_terminal() {
                let _ = self.observe_stream(loc.block_address, true, ctx);
            }
            let set = self.set_mut(loc.set);
            if kind.is_write() {
                set[way].dirty = true;
            }
            lru::touch(set, way);
            return;
        }

        trace!(
            cache_level = self.level,
            %kind,
            addr,
            set = loc.set,
            tag = loc.tag,
            "miss"
        );

        let way = self.make_space_in_set(loc.set, layout, ctx);
        let from_stream = self.fetch(addr, loc.block_address, ctx);
        if !from_stream {
            match kind {
                AccessKind::Read => self.stats.read_misses += 1,
                AccessKind::Write => self.stats.write_misses += 1,
            }
        }
        self.place_block(loc.set, way, loc.tag, kind.is_write());
    }

    /// Returns `true` if the block containing `addr` is present.
    pub fn contains(&self, addr: u32) -> bool {
        self.probe(addr).is_some()
    }

    /// Returns a copy of the way holding the block containing `addr`, if present.
    ///
    /// Does not touch the LRU state.
    pub fn probe(&self, addr: u32) -> Option<CacheBlock> {
        let loc = self.layout?.locate(addr);
        let way = self.lookup(loc.set, loc.tag)?;
        Some(self.set(loc.set)[way])
    }

    /// The ways of set `index` in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CacheLevel::num_sets`].
    pub fn set(&self, index: usize) -> &[CacheBlock] {
        &self.blocks[index * self.ways..(index + 1) * self.ways]
    }

    /// Snapshot of set `index` ordered from most to least recently used.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CacheLevel::num_sets`].
    pub fn set_by_recency(&self, index: usize) -> Vec<CacheBlock> {
        let mut ways = self.set(index).to_vec();
        ways.sort_by_key(|block| block.recency);
        ways
    }

    /// Snapshots of every set, in set order, each ordered most to least recently used.
    pub fn sets_by_recency(&self) -> impl Iterator<Item = Vec<CacheBlock>> + '_ {
        self.blocks.chunks_exact(self.ways.max(1)).map(|set| {
            let mut ways = set.to_vec();
            ways.sort_by_key(|block| block.recency);
            ways
        })
    }

    fn set_mut(&mut self, index: usize) -> &mut [CacheBlock] {
        &mut self.blocks[index * self.ways..(index + 1) * self.ways]
    }

    fn lookup(&self, set: usize, tag: u32) -> Option<usize> {
        self.set(set)
            .iter()
            .position(|block| block.valid && block.tag == tag)
    }

    /// Frees the LRU way of `set`, writing it back first if it is dirty.
    ///
    /// Returns the freed way. Its contents are left in place until overwritten.
    fn make_space_in_set(&mut self, set: usize, layout: AddressLayout, ctx: &mut SimContext) -> usize {
        let ways = self.set(set);
        let way = lru::victim(ways);
        let victim = ways[way];

        if victim.valid && victim.dirty {
            let victim_addr = layout.rebuild(victim.tag, set);
            debug!(
                cache_level = self.level,
                set,
                tag = victim.tag,
                victim_addr,
                to_memory = self.is_terminal(),
                "dirty eviction"
            );
            match self.next.as_deref_mut() {
                Some(next) => next.write(victim_addr, ctx),
                None => ctx.record_memory_transfers(1),
            }
            self.stats.writebacks += 1;
        }
        way
    }

    /// Brings the missing block in from below.
    ///
    /// Returns `true` when a stream buffer supplied the block, in which case the
    /// request does not count as a miss.
    fn fetch(&mut self, addr: u32, block_address: u32, ctx: &mut SimContext) -> bool {
        if let Some(next) = self.next.as_deref_mut() {
            next.read(addr, ctx);
            return false;
        }
        if self.prefetcher.is_some() {
            return self.observe_stream(block_address, false, ctx);
        }
        ctx.record_memory_transfers(1);
        false
    }

    /// Shows a block to the prefetcher and accounts the traffic it generates.
    ///
    /// A re-primed stream also pays for the demand fetch of the block itself.
    fn observe_stream(&mut self, block_address: u32, hit_in_cache: bool, ctx: &mut SimContext) -> bool {
        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return false;
        };

        match prefetcher.observe(block_address, hit_in_cache) {
            StreamEvent::Hit { fetched } => {
                trace!(
                    cache_level = self.level,
                    block_address,
                    fetched,
                    "stream buffer hit"
                );
                self.stats.prefetches += u64::from(fetched);
                ctx.record_memory_transfers(u64::from(fetched));
                true
            }
            StreamEvent::Reprimed { fetched } => {
                debug!(
                    cache_level = self.level,
                    block_address,
                    fetched,
                    "stream buffer reprimed"
                );
                self.stats.prefetches += u64::from(fetched);
                ctx.record_memory_transfers(u64::from(fetched) + 1);
                false
            }
            StreamEvent::Bypassed => false,
        }
    }

    fn place_block(&mut self, set: usize, way: usize, tag: u32, dirty: bool) {
        let ways = self.set_mut(set);
        ways[way].valid = true;
        ways[way].dirty = dirty;
        ways[way].tag = tag;
        lru::touch(ways, way);
    }
}
