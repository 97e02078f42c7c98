//! # apple-dict-reader
//!
//! A reader for Apple Dictionary.app containers (the `Body.data` file inside a
//! `.dictionary` bundle) and a strict grammar for their entry markup.
//!
//! The container is a sequence of zlib-compressed chunks; each chunk holds
//! newline-separated `<d:entry>` fragments. [`AppleDictReader`] walks the
//! chunks lazily and yields [`DictionaryDefinition`] records, and
//! [`appledict::grammar::parse`] turns a record's markup into a structured
//! [`Entry`].
pub mod appledict;
pub mod dataset;

// Re-export the main types for convenience
pub use appledict::{
    AppleDictError,
    AppleDictReader,
    Result,
    iter::{DefinitionIterator, EntryIterator},
    markup::MarkupTree,
    types::{
        entry::{
            Definition,
            DictionaryDefinition,
            Entry,
            Meaning,
            Pronunciation,
            ReferenceDefinition,
            Sense,
        },
        models::ContainerLayout,
    },
};
