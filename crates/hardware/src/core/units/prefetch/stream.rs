//! Stream Buffer Prefetcher.
//!
//! The prefetcher tracks `N` independent streams. Each stream is identified by its
//! head, the block address at which a window of `M` consecutive blocks starts. The
//! heads are kept in recency order by position: index 0 is the most recently used
//! stream, the last index the least recently used one.
//!
//! For every block the last cache level looks up, one of three things happens:
//!
//! 1. **Window hit:** the block falls inside some stream's window. The stream is
//!    considered to have filled from its head up to and including the block, so
//!    `block - head + 1` blocks are fetched from memory. The stream now starts just
//!    past the block and becomes the most recently used one.
//! 2. **Cache hit, no window hit:** nothing changes.
//! 3. **Cache miss, no window hit:** the least recently used stream is dropped and a
//!    new one is primed just past the block by fetching its whole window.
//!
//! A head that has never been assigned is empty. Empty heads match nothing and are
//! not reported.

use std::ops::Range;

use crate::common::ConfigError;

/// Outcome of showing one block address to the prefetcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    /// The block was inside a stream window and is supplied by the stream buffer.
    Hit {
        /// Blocks fetched from memory to advance the stream up to the requested block.
        fetched: u32,
    },

    /// The block missed every window but hit in the cache; no stream moved.
    Bypassed,

    /// The block missed both the cache and every window; a stream was (re)primed.
    Reprimed {
        /// Blocks fetched from memory to fill the new stream window.
        fetched: u32,
    },
}

impl StreamEvent {
    /// Returns `true` when the request was satisfied by a stream buffer.
    #[inline]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Multi-stream buffer prefetcher state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamPrefetcher {
    /// Stream heads, most recently used first. `None` marks a stream never primed.
    heads: Vec<Option<u32>>,
    /// Number of consecutive blocks each stream covers.
    window: u32,
}

impl StreamPrefetcher {
    /// Creates a prefetcher with `streams` empty stream buffers of `window` blocks each.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefetchWindow`] if `streams > 0` and `window == 0`.
    pub fn new(streams: u32, window: u32) -> Result<Self, ConfigError> {
        if streams > 0 && window == 0 {
            return Err(ConfigError::EmptyPrefetchWindow { streams });
        }
        Ok(Self {
            heads: vec![None; streams as usize],
            window,
        })
    }

    /// Number of stream buffers.
    #[inline]
    pub fn streams(&self) -> usize {
        self.heads.len()
    }

    /// Number of blocks covered by each stream.
    #[inline]
    pub const fn window(&self) -> u32 {
        self.window
    }

    /// Stream heads in most- to least-recently-used order; `None` for empty streams.
    #[inline]
    pub fn heads(&self) -> &[Option<u32>] {
        &self.heads
    }

    /// Windows of the non-empty streams, most recently used first.
    pub fn buffers(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        self.heads
            .iter()
            .flatten()
            .map(|&head| u64::from(head)..u64::from(head) + u64::from(self.window))
    }

    /// Position of the stream whose window contains `block`, if any.
    pub fn find(&self, block: u32) -> Option<usize> {
        let block = u64::from(block);
        let window = u64::from(self.window);
        self.heads.iter().position(|head| {
            head.is_some_and(|head| {
                let head = u64::from(head);
                head <= block && block < head + window
            })
        })
    }

    /// Shows `block` to the prefetcher and updates the streams.
    ///
    /// `hit_in_cache` tells whether the owning level already holds the block; it only
    /// matters when no window contains the block. A prefetcher with no streams
    /// bypasses every block.
    pub fn observe(&mut self, block: u32, hit_in_cache: bool) -> StreamEvent {
        if self.heads.is_empty() {
            return StreamEvent::Bypassed;
        }

        if let Some(pos) = self.find(block) {
            let head = self.heads.remove(pos).unwrap_or(block);
            self.heads.insert(0, Some(block.wrapping_add(1)));
            return StreamEvent::Hit {
                fetched: block - head + 1,
            };
        }

        if hit_in_cache {
            return StreamEvent::Bypassed;
        }

        let _ = self.heads.pop();
        self.heads.insert(0, Some(block.wrapping_add(1)));
        StreamEvent::Reprimed {
            fetched: self.window,
        }
    }
}
