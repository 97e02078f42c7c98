//! Low-level byte reading and text decoding utilities

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::{Encoding, UTF_8};
use log::warn;

use super::types::error::{AppleDictError, Result};

/// Reads a little-endian `i32`, the width of every offset and size in the container.
pub fn read_i32(reader: &mut impl Read) -> Result<i32> {
    Ok(reader.read_i32::<LittleEndian>()?)
}

/// Reads a size or length field, rejecting negative values.
pub fn read_len(reader: &mut impl Read, context: &str) -> Result<u64> {
    let value = read_i32(reader)?;
    u64::try_from(value)
        .map_err(|_| AppleDictError::InvalidFormat(format!("negative {}: {}", context, value)))
}

/// Resolves an encoding label (`utf-8`, `latin1`, ...), falling back to UTF-8.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!("Unknown encoding label '{}', falling back to UTF-8", label);
        UTF_8
    })
}

/// Strictly decodes `bytes`; malformed sequences are an error rather than replaced.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            AppleDictError::InvalidEncoding(format!(
                "{} bytes are not valid {}",
                bytes.len(),
                encoding.name()
            ))
        })
}
