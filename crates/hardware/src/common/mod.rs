//! Common types shared by every part of the cache simulator.
//!
//! This module provides the small building blocks the core and its collaborators agree on:
//! 1. **Address Layout:** Splitting a flat 32-bit address into block offset, set index, and tag.
//! 2. **Access Kinds:** Distinguishing demand reads from demand writes.
//! 3. **Error Handling:** Configuration, trace, and top-level simulation errors.

/// Address decomposition for a single cache level.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, trace input, and simulation.
pub mod error;

pub use addr::{ADDR_BITS, AddressLayout, BlockLocation};
pub use data::AccessKind;
pub use error::{ConfigError, SimError, TraceError};
