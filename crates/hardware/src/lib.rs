//! Trace-driven cache hierarchy simulator library.
//!
//! This crate models the hit/miss and traffic behavior of a two-level set-associative
//! cache hierarchy with stream-buffer prefetching:
//! 1. **Core:** Cache levels (LRU, write-back, write-allocate), the stream prefetcher, and the level chain.
//! 2. **Configuration:** Geometry and prefetch parameters with validation.
//! 3. **Simulation:** Trace parsing, sequential replay, and the end-of-run report.
//! 4. **Statistics:** Per-level counters and main-memory traffic.
//!
//! ```
//! use cachesim_core::{CacheHierarchy, Config};
//!
//! let mut hierarchy = CacheHierarchy::new(&Config::default())?;
//! hierarchy.read(0x1000);
//! hierarchy.read(0x1000);
//! assert_eq!(hierarchy.first().stats().read_misses, 1);
//! # Ok::<(), cachesim_core::common::ConfigError>(())
//! ```

/// Common types (address layout, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, per-level geometry, prefetch parameters).
pub mod config;
/// Cache hierarchy core (levels, prefetcher, shared context).
pub mod core;
/// Trace reading, replay, and report rendering.
pub mod sim;
/// Counters and the measurement summary.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level error type returned by the driver-facing entry points.
pub use crate::common::SimError;
/// Chain of cache levels; construct with `CacheHierarchy::new`.
pub use crate::core::CacheHierarchy;
/// Trace-driven simulator owning a hierarchy and its configuration.
pub use crate::sim::Simulator;
/// Counter summary of a run.
pub use crate::stats::SimStats;
