//! Cache Hierarchy.
//!
//! The hierarchy is an owned chain: the first level owns the second, the second would
//! own a third, and the last enabled level owns nothing and talks to main memory.
//! Every request enters at the first level. A disabled level is left out of the chain
//! entirely, so disabling a level is the same as omitting it; it is kept aside only so
//! its (zero) counters can still be reported.

use std::iter;

use tracing::debug;

use crate::common::{AccessKind, ConfigError};
use crate::config::Config;
use crate::core::context::SimContext;
use crate::core::units::cache::CacheLevel;

/// A chain of cache levels plus the context shared by one replay.
#[derive(Debug)]
pub struct CacheHierarchy {
    first: CacheLevel,
    detached: Vec<CacheLevel>,
    context: SimContext,
}

impl CacheHierarchy {
    /// Builds the L1/L2 hierarchy described by `config`.
    ///
    /// Every level is given the prefetch parameters; only the terminal one uses them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let levels = config
            .levels()
            .into_iter()
            .map(|(level, geometry)| {
                CacheLevel::new(
                    level,
                    geometry.size_bytes,
                    geometry.assoc,
                    config.block_size,
                    config.prefetch,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_levels(levels)
    }

    /// Chains `levels` in order, skipping disabled ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FirstLevelDisabled`] if `levels` is empty or its first
    /// level is disabled.
    pub fn from_levels(levels: Vec<CacheLevel>) -> Result<Self, ConfigError> {
        if !levels.first().is_some_and(CacheLevel::enabled) {
            return Err(ConfigError::FirstLevelDisabled);
        }

        let mut detached = Vec::new();
        let mut chain: Option<CacheLevel> = None;
        for mut level in levels.into_iter().rev() {
            if !level.enabled() {
                debug!(cache_level = level.level(), "cache level disabled");
                detached.push(level);
                continue;
            }
            if let Some(next) = chain.take() {
                level.attach_next(next);
            }
            chain = Some(level);
        }
        detached.reverse();

        let first = chain.ok_or(ConfigError::FirstLevelDisabled)?;
        Ok(Self {
            first,
            detached,
            context: SimContext::new(),
        })
    }

    /// Issues a demand read to the first level.
    pub fn read(&mut self, addr: u32) {
        self.first.read(addr, &mut self.context);
    }

    /// Issues a demand write to the first level.
    pub fn write(&mut self, addr: u32) {
        self.first.write(addr, &mut self.context);
    }

    /// Issues a demand access of the given kind to the first level.
    pub fn access(&mut self, kind: AccessKind, addr: u32) {
        self.first.access(addr, kind, &mut self.context);
    }

    /// The entry level.
    #[inline]
    pub const fn first(&self) -> &CacheLevel {
        &self.first
    }

    /// The enabled levels, first to terminal.
    pub fn levels(&self) -> impl Iterator<Item = &CacheLevel> {
        iter::successors(Some(&self.first), |level| level.next())
    }

    /// The terminal level; main memory sits directly below it.
    pub fn terminal(&self) -> &CacheLevel {
        self.levels().last().unwrap_or(&self.first)
    }

    /// Looks up a level by number, including disabled levels.
    pub fn level(&self, number: u32) -> Option<&CacheLevel> {
        self.levels()
            .chain(self.detached.iter())
            .find(|level| level.level() == number)
    }

    /// Context shared by all levels.
    #[inline]
    pub const fn context(&self) -> &SimContext {
        &self.context
    }

    /// Total block-sized transfers to and from main memory so far.
    #[inline]
    pub const fn memory_traffic(&self) -> u64 {
        self.context.memory_traffic()
    }
}
