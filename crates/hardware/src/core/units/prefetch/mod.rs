//! Hardware prefetcher.
//!
//! The simulator models a single prefetcher design: a set of stream buffers that sit
//! between the last cache level and main memory. It is attached to a level at
//! construction but only consulted while that level has no successor.

/// Multi-stream buffer prefetcher.
pub mod stream;

pub use self::stream::{StreamEvent, StreamPrefetcher};
