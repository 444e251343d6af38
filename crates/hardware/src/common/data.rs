//! Memory Access Types.
//!
//! Every trace event and every request travelling between cache levels is either
//! a read or a write. The kind decides which counters move and whether a placed
//! block starts out dirty.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Demand read. On a miss the block is placed clean.
    Read,

    /// Demand write. On a miss the block is fetched first and placed dirty
    /// (write-allocate); on a hit the block becomes dirty.
    Write,
}

impl AccessKind {
    /// Maps a trace request character (`r` / `w`) to an access kind.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::Read),
            'w' => Some(Self::Write),
            _ => None,
        }
    }

    /// Returns the trace request character for this kind.
    pub const fn as_char(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }

    /// Returns `true` for [`AccessKind::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
