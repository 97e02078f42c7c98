//! # Container Walking
//!
//! Reads the chunk table limit from the header and the length-prefixed
//! chunks that follow it. Each chunk is:
//!
//! ```text
//! [4 bytes]  chunk size N (little-endian i32)
//! [8 bytes]  chunk sub-header (not part of the payload)
//! [N-8 bytes] zlib payload
//! ```

use std::io::{Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::appledict::codec::compression;
use crate::appledict::types::error::{AppleDictError, Result};
use crate::appledict::types::models::{ChunkMeta, ContainerLayout};
use crate::appledict::utils;

/// Reads the end offset of the chunk table and leaves the source positioned at
/// the first chunk.
pub fn read_chunk_limit<R: Read + Seek>(source: &mut R, layout: &ContainerLayout) -> Result<u64> {
    source.seek(SeekFrom::Start(layout.table_length_offset))?;
    let table_length = utils::read_i32(source)?;
    if table_length < 0 {
        return Err(AppleDictError::InvalidFormat(format!(
            "negative chunk table length: {}",
            table_length
        )));
    }
    let limit = layout.chunk_limit(table_length);
    debug!(
        "Chunk table length {} bytes, limit {:#x}, first chunk at {:#x}",
        table_length, limit, layout.first_chunk_offset
    );

    source.seek(SeekFrom::Start(layout.first_chunk_offset))?;
    Ok(limit)
}

/// Reads the chunk at the current position and returns its decompressed text.
///
/// On success the source is positioned at the next chunk's size prefix.
pub fn read_chunk<R: Read + Seek>(
    source: &mut R,
    layout: &ContainerLayout,
    index: usize,
) -> Result<(ChunkMeta, Vec<u8>)> {
    let file_offset = source.stream_position()?;
    let size = utils::read_len(source, "chunk size")?;
    let meta = ChunkMeta { index, file_offset, size };

    if (size as usize) < layout.chunk_header_len {
        return Err(AppleDictError::InvalidFormat(format!(
            "{} is shorter than its {} byte sub-header",
            meta, layout.chunk_header_len
        )));
    }

    let mut raw = vec![0u8; size as usize];
    source.read_exact(&mut raw)?;
    trace!("Read {}", meta);

    let text = compression::inflate(&raw[layout.chunk_header_len..])?;
    debug!("Decoded {}: {} bytes of text", meta, text.len());
    Ok((meta, text))
}
