//! Address decomposition.
//!
//! A cache level views a 32-bit address as three fields:
//!
//! ```text
//!  31                              block_bits + index_bits      block_bits         0
//! +---------------------------------+----------------------------+------------------+
//! |               tag               |         set index          |   block offset   |
//! +---------------------------------+----------------------------+------------------+
//! ```
//!
//! The block offset is never modeled beyond being shifted away. Everything here is
//! pure arithmetic with no error conditions; the geometry is assumed consistent
//! (power-of-two block size and set count) by the time a layout is built.

/// Width of a simulated address in bits.
pub const ADDR_BITS: u32 = 32;

/// Fixed bit layout of addresses for one cache level.
///
/// Derived once from the block size and set count and never changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    block_bits: u32,
    index_bits: u32,
    num_sets: u32,
}

/// The location an address maps to inside a cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLocation {
    /// Address with the block offset shifted away.
    pub block_address: u32,
    /// Set the block maps to.
    pub set: usize,
    /// Tag stored in the way that holds the block.
    pub tag: u32,
}

impl AddressLayout {
    /// Creates the layout for a level with `block_size`-byte blocks and `num_sets` sets.
    ///
    /// Bit widths are `floor(log2(..))` of the inputs.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` or `num_sets` is zero.
    pub const fn new(block_size: u32, num_sets: u32) -> Self {
        Self {
            block_bits: block_size.ilog2(),
            index_bits: num_sets.ilog2(),
            num_sets,
        }
    }

    /// Number of block offset bits.
    #[inline]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of set index bits.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Number of tag bits left over in a 32-bit address.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDR_BITS - self.index_bits - self.block_bits
    }

    /// Number of sets addressed by the index field.
    #[inline]
    pub const fn num_sets(&self) -> u32 {
        self.num_sets
    }

    /// Returns `addr` with the block offset removed.
    #[inline]
    pub const fn block_address(&self, addr: u32) -> u32 {
        addr >> self.block_bits
    }

    /// Splits `addr` into block address, set index, and tag.
    #[inline]
    pub const fn locate(&self, addr: u32) -> BlockLocation {
        let block_address = self.block_address(addr);
        BlockLocation {
            block_address,
            set: (block_address % self.num_sets) as usize,
            tag: block_address >> self.index_bits,
        }
    }

    /// Rebuilds the base address of the block identified by `tag` and `set`.
    ///
    /// The block offset comes back as zero; it is not tracked.
    #[inline]
    pub const fn rebuild(&self, tag: u32, set: usize) -> u32 {
        ((tag << self.index_bits) | set as u32) << self.block_bits
    }
}
