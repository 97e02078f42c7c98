//! Codec layer for chunk payloads.
//!
//! # Submodules
//!
//! - [`compression`][]: zlib/deflate inflation of chunk payloads

pub mod compression;
