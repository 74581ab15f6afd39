//! Address decomposition for set-associative caches.
//!
//! A 32-bit physical address splits into three fields, low to high:
//! `b` block-offset bits, `s` set-index bits, and `32 - s - b` tag bits.
//! `AddressMap` captures one such split and extracts the fields, so the
//! cache and the snoop path agree on the mapping by construction.

/// Bit-field split of a 32-bit address for a given cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressMap {
    set_index_bits: u32,
    block_bits: u32,
}

impl AddressMap {
    /// Creates an address map with `set_index_bits` index bits and
    /// `block_bits` offset bits.
    pub fn new(set_index_bits: u32, block_bits: u32) -> Self {
        Self {
            set_index_bits,
            block_bits,
        }
    }

    /// Extracts the set index from an address.
    #[inline(always)]
    pub fn set_index(&self, address: u32) -> usize {
        ((address >> self.block_bits) & ((1 << self.set_index_bits) - 1)) as usize
    }

    /// Extracts the tag from an address.
    #[inline(always)]
    pub fn tag(&self, address: u32) -> u32 {
        address >> (self.set_index_bits + self.block_bits)
    }

    /// Extracts the byte offset within the block.
    #[inline(always)]
    pub fn block_offset(&self, address: u32) -> u32 {
        address & ((1 << self.block_bits) - 1)
    }

    /// Number of tag bits left above the index and offset fields.
    pub fn tag_bits(&self) -> u32 {
        32 - self.set_index_bits - self.block_bits
    }
}
