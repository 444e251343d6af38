//! Error definitions.
//!
//! The simulator is a batch tool: every error here is fatal and reported once by the
//! driver before it exits. There are three families:
//! 1. **Configuration:** Inconsistent prefetch parameters or cache geometry, or an unparsable config file.
//! 2. **Trace Input:** An unreadable trace file, an unknown request kind, or a malformed line.
//! 3. **Simulation:** The umbrella type returned by the high-level entry points.
//!
//! Once a hierarchy has been constructed, reads and writes cannot fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Prefetching was enabled with stream buffers that cover no blocks.
    #[error("prefetch enabled with {streams} stream buffer(s) but a window of 0 blocks")]
    EmptyPrefetchWindow {
        /// Configured number of stream buffers.
        streams: u32,
    },

    /// Block size is zero or not a power of two.
    #[error("block size {0} is not a nonzero power of two")]
    BlockSize(u32),

    /// The first level cannot be disabled; every request enters through it.
    #[error("L1 must have a nonzero size")]
    FirstLevelDisabled,

    /// An enabled level was configured with zero ways.
    #[error("L{level} associativity must be at least 1")]
    Associativity {
        /// Level number (1-based).
        level: u32,
    },

    /// Level size does not split into whole sets.
    #[error("L{level} size {size} is not a multiple of associativity x block size ({set_bytes})")]
    UnevenSets {
        /// Level number (1-based).
        level: u32,
        /// Configured level size in bytes.
        size: u32,
        /// Bytes per set (`assoc * block_size`).
        set_bytes: u64,
    },

    /// Derived set count is not a power of two, so it has no index field width.
    #[error("L{level} has {sets} sets, which is not a power of two")]
    SetCount {
        /// Level number (1-based).
        level: u32,
        /// Derived number of sets.
        sets: u64,
    },

    /// A JSON configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while reading or parsing a memory reference trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("unable to open file {}: {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened trace failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// The request type was neither `r` nor `w`.
    #[error("line {line}: unknown request type {kind}")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// Offending request character.
        kind: char,
    },

    /// The line did not have the `<r|w> <hex address>` shape.
    #[error("line {line}: malformed request {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Line contents, trimmed.
        text: String,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be replayed.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
