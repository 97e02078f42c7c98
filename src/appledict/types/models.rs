//! Core data structures for the Apple dictionary container.
//!
//! This module defines the layout parameters of the binary container and the
//! per-chunk bookkeeping the reader keeps while walking it.

use std::fmt;

/// Fixed offsets of an Apple dictionary `Body.data` container.
///
/// ```text
/// 0x00 ┌──────────────────────────┐
///      │  opaque header           │
/// 0x40 │  i32 chunk table length  │ ← limit = 0x40 + 4 + length
///      │  ...                     │
/// 0x60 ├──────────────────────────┤
///      │  i32 chunk size          │
///      │  8 byte chunk sub-header │
///      │  zlib payload            │
///      ├──────────────────────────┤
///      │  next chunk ...          │
///      └──────────────────────────┘
/// ```
///
/// All integers are little-endian `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    /// Offset of the chunk table length field.
    pub table_length_offset: u64,
    /// Offset at which the first chunk's size prefix begins.
    pub first_chunk_offset: u64,
    /// Number of leading bytes in every chunk that precede the compressed payload.
    pub chunk_header_len: usize,
}

impl ContainerLayout {
    /// The layout used by Dictionary.app bundles.
    pub const APPLE: ContainerLayout = ContainerLayout {
        table_length_offset: 0x40,
        first_chunk_offset: 0x60,
        chunk_header_len: 8,
    };

    /// End offset of the chunk table for a given declared table length.
    ///
    /// The length counts from the end of its own 4-byte field.
    pub fn chunk_limit(&self, table_length: i32) -> u64 {
        self.table_length_offset + 4 + table_length as u64
    }
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self::APPLE
    }
}

/// Location of a single compressed chunk within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMeta {
    /// Zero-based position of the chunk in the table.
    pub index: usize,
    /// Absolute offset of the chunk's size prefix.
    pub file_offset: u64,
    /// Declared chunk size (sub-header plus payload), in bytes.
    pub size: u64,
}

impl fmt::Display for ChunkMeta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "chunk #{} at {:#x} ({} bytes)", self.index, self.file_offset, self.size)
    }
}
