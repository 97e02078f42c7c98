//! Grammar for the markup of a single dictionary entry.
//!
//! The grammar is closed: each position accepts a fixed set of element
//! classes (see [`classes`]) and anything else fails with
//! [`AppleDictError::ParseAssumption`](crate::appledict::types::error::AppleDictError::ParseAssumption).
//! Parsing is a pure function of the markup tree.
//!
//! - [`entry`]: fragment root, head group, definition group and trailing sections
//! - [`pronunciation`]: phonetic renderings of the headword
//! - [`sense`]: part-of-speech scoped senses, with optional sub-senses
//! - [`definitions`]: definition and cross-reference lists
//! - [`sections`]: derivatives and etymology

pub mod classes;
pub mod definitions;
pub mod entry;
pub mod pronunciation;
pub mod sections;
pub mod sense;

pub use entry::{parse, parse_definition};
