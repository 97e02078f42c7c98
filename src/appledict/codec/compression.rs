//! Decompression of Apple dictionary chunk payloads.
//!
//! Every chunk payload is a zlib stream. No decompressed size is declared,
//! so the output grows as needed.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::trace;

use crate::appledict::types::error::{AppleDictError, Result};

/// Inflates a zlib payload into `output`, replacing its previous contents.
///
/// # Errors
/// Returns [`AppleDictError::DecompressionError`] if the stream is corrupt or truncated.
pub fn inflate_into(output: &mut Vec<u8>, payload: &[u8]) -> Result<()> {
    output.clear();
    trace!("Decompressing with Zlib: {} bytes", payload.len());
    let mut decoder = ZlibDecoder::new(payload);
    decoder
        .read_to_end(output)
        .map_err(|e| AppleDictError::DecompressionError(format!("Zlib decompression failed: {}", e)))?;
    trace!("Decompressed to {} bytes", output.len());
    Ok(())
}

/// Convenience wrapper around [`inflate_into`] that allocates the output.
pub fn inflate(payload: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(payload.len() * 4);
    inflate_into(&mut output, payload)?;
    Ok(output)
}
