//! Configuration for the cache simulator.
//!
//! This module defines the parameter set the driver hands to the core. It provides:
//! 1. **Defaults:** The reference geometry (32-byte blocks, 8 KiB 4-way L1, 256 KiB 8-way L2).
//! 2. **Structures:** Per-level geometry and stream-buffer prefetch parameters.
//! 3. **Validation:** Collaborator-side geometry checks the core itself does not perform.
//!
//! Configuration is built from the command-line arguments or deserialized from JSON.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default block size in bytes.
    pub const BLOCK_SIZE: u32 = 32;

    /// Default L1 size in bytes (8 KiB).
    pub const L1_SIZE: u32 = 8192;

    /// Default L1 associativity.
    pub const L1_ASSOC: u32 = 4;

    /// Default L2 size in bytes (256 KiB).
    pub const L2_SIZE: u32 = 262_144;

    /// Default L2 associativity.
    pub const L2_ASSOC: u32 = 8;
}

/// Root configuration: block size shared by all levels, two levels, and the prefetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Block size in bytes, shared by every level.
    #[serde(default = "Config::default_block_size")]
    pub block_size: u32,

    /// First-level cache. Always enabled.
    #[serde(default = "Config::default_l1")]
    pub l1: LevelConfig,

    /// Second-level cache. A size of 0 disables it.
    #[serde(default = "Config::default_l2")]
    pub l2: LevelConfig,

    /// Stream-buffer prefetcher attached to the last enabled level.
    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

/// Geometry of one cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Total capacity in bytes; 0 disables the level.
    #[serde(default)]
    pub size_bytes: u32,

    /// Number of ways per set.
    #[serde(default)]
    pub assoc: u32,
}

/// Stream-buffer prefetcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Number of stream buffers (`N`). 0 disables prefetching.
    #[serde(default)]
    pub streams: u32,

    /// Blocks covered by each stream buffer (`M`).
    #[serde(default)]
    pub window: u32,
}

impl Config {
    /// Returns the default block size in bytes.
    fn default_block_size() -> u32 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default L1 geometry.
    fn default_l1() -> LevelConfig {
        LevelConfig::new(defaults::L1_SIZE, defaults::L1_ASSOC)
    }

    /// Returns the default L2 geometry.
    fn default_l2() -> LevelConfig {
        LevelConfig::new(defaults::L2_SIZE, defaults::L2_ASSOC)
    }

    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    ///
    /// The result is not validated; call [`Config::validate`] before use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the level configurations in hierarchy order, paired with their level number.
    pub const fn levels(&self) -> [(u32, LevelConfig); 2] {
        [(1, self.l1), (2, self.l2)]
    }

    /// Checks that the configuration describes a buildable hierarchy.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPrefetchWindow`] if stream buffers are enabled with a zero window.
    /// - [`ConfigError::BlockSize`] if the block size is not a nonzero power of two.
    /// - [`ConfigError::FirstLevelDisabled`] if L1 has no capacity.
    /// - [`ConfigError::Associativity`], [`ConfigError::UnevenSets`], or
    ///   [`ConfigError::SetCount`] if an enabled level does not divide into a
    ///   power-of-two number of whole sets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prefetch.validate()?;

        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if !self.l1.enabled() {
            return Err(ConfigError::FirstLevelDisabled);
        }

        for (level, geometry) in self.levels() {
            if geometry.enabled() {
                let _ = geometry.num_sets(level, self.block_size)?;
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_SIZE,
            l1: Self::default_l1(),
            l2: Self::default_l2(),
            prefetch: PrefetchConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Creates a level geometry.
    pub const fn new(size_bytes: u32, assoc: u32) -> Self {
        Self { size_bytes, assoc }
    }

    /// A level with zero capacity is disabled.
    #[inline]
    pub const fn enabled(&self) -> bool {
        self.size_bytes > 0
    }

    /// Derives the set count for `block_size`-byte blocks, checking that it is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockSize`], [`ConfigError::Associativity`],
    /// [`ConfigError::UnevenSets`], or [`ConfigError::SetCount`] when the geometry
    /// does not split into a power-of-two number of whole sets.
    pub fn num_sets(&self, level: u32, block_size: u32) -> Result<u32, ConfigError> {
        if !block_size.is_power_of_two() {
            return Err(ConfigError::BlockSize(block_size));
        }
        if self.assoc == 0 {
            return Err(ConfigError::Associativity { level });
        }
        let set_bytes = u64::from(self.assoc) * u64::from(block_size);
        let size = u64::from(self.size_bytes);
        if size % set_bytes != 0 {
            return Err(ConfigError::UnevenSets {
                level,
                size: self.size_bytes,
                set_bytes,
            });
        }
        let sets = size / set_bytes;
        if !sets.is_power_of_two() {
            return Err(ConfigError::SetCount { level, sets });
        }
        Ok(sets as u32)
    }
}

impl PrefetchConfig {
    /// Creates prefetcher parameters with `streams` buffers of `window` blocks each.
    pub const fn new(streams: u32, window: u32) -> Self {
        Self { streams, window }
    }

    /// Prefetching is enabled when at least one stream buffer is configured.
    #[inline]
    pub const fn enabled(&self) -> bool {
        self.streams > 0
    }

    /// Rejects stream buffers with an empty window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefetchWindow`] when `streams > 0` and `window == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.streams > 0 && self.window == 0 {
            return Err(ConfigError::EmptyPrefetchWindow {
                streams: self.streams,
            });
        }
        Ok(())
    }
}
