//! File format parsing layer for Apple dictionary containers.
//!
//! This module bridges raw file I/O and the high-level
//! [`AppleDictReader`](crate::appledict::reader::AppleDictReader).
//!
//! # Module Organization
//!
//! - [`container`]: Reads the chunk table limit and individual chunks
//! - [`fragment`]: Splits decompressed chunk text into entry fragments
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← container::read_chunk_limit()
//! ├─────────────────┤
//! │  Chunk 0        │ ← container::read_chunk()
//! │  (size, sub-    │       └─ fragment::find_fragments()
//! │   header, zlib) │             └─ fragment::decode_definition()
//! ├─────────────────┤
//! │  Chunk 1 ...    │
//! └─────────────────┘
//! ```

pub mod container;
pub mod fragment;
