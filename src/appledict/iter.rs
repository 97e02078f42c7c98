//! Iterators for sequential access to dictionary entries.
//!
//! The design is layered like a pipeline:
//!
//! 1. [`DefinitionIterator`] - raw [`DictionaryDefinition`] records, one chunk decompressed at a time
//! 2. [`EntryIterator`] - the same records paired with their parsed [`Entry`]
//!
//! # Errors
//! Container-level failures (I/O, decompression, bad chunk sizes) end the
//! sequence after being yielded once. Fragment-level failures (a missing
//! title, malformed markup, a grammar violation) are yielded and iteration
//! carries on with the next fragment, so callers can choose to abort or skip.
//!
//! # Example
//! ```no_run
//! # use apple_dict_reader::AppleDictReader;
//! let reader = AppleDictReader::open("Body.data", None).unwrap();
//! for result in reader.entries() {
//!     match result {
//!         Ok((definition, entry)) => println!("{}: {} senses", definition.title, entry.senses.len()),
//!         Err(e) => eprintln!("skipping: {}", e),
//!     }
//! }
//! ```

use std::io::{Read, Seek};
use std::vec::IntoIter;

use log::debug;

use super::format::fragment;
use super::grammar;
use super::reader::AppleDictReader;
use super::types::entry::{DictionaryDefinition, Entry};
use super::types::error::Result;

/// Iterator over the raw definitions of a container.
///
/// Created by [`AppleDictReader::definitions()`].
pub struct DefinitionIterator<R: Read + Seek> {
    reader: AppleDictReader<R>,
    chunk_idx: usize,
    current_fragments: IntoIter<Vec<u8>>,
    finished: bool,
}

impl<R: Read + Seek> DefinitionIterator<R> {
    pub(super) fn new(reader: AppleDictReader<R>) -> Self {
        Self {
            reader,
            chunk_idx: 0,
            current_fragments: Vec::new().into_iter(),
            finished: false,
        }
    }

    /// Transforms this iterator to also run the entry grammar on each record.
    pub fn parse_entries(self) -> EntryIterator<R> {
        EntryIterator { definitions: self }
    }

    /// Number of chunks decompressed so far.
    pub fn chunks_read(&self) -> usize {
        self.chunk_idx
    }

    /// Loads the next chunk's fragments. Returns `false` once the table is exhausted.
    fn load_next_chunk(&mut self) -> Result<bool> {
        if !self.reader.has_more_chunks()? {
            debug!("Chunk table exhausted after {} chunks", self.chunk_idx);
            return Ok(false);
        }
        let (meta, text) = self.reader.read_next_chunk(self.chunk_idx)?;
        let fragments: Vec<Vec<u8>> = fragment::find_fragments(&text).map(<[u8]>::to_vec).collect();
        debug!("{}: {} fragments", meta, fragments.len());

        self.current_fragments = fragments.into_iter();
        self.chunk_idx += 1;
        Ok(true)
    }
}

impl<R: Read + Seek> Iterator for DefinitionIterator<R> {
    type Item = Result<DictionaryDefinition>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bytes) = self.current_fragments.next() {
                match fragment::decode_definition(&bytes, self.reader.encoding()) {
                    Ok(Some(definition)) => return Some(Ok(definition)),
                    // Degenerate fragment, already logged.
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e)),
                }
            }

            if self.finished {
                return None;
            }

            match self.load_next_chunk() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Iterator over definitions paired with their parsed entries.
///
/// Created by [`DefinitionIterator::parse_entries()`].
pub struct EntryIterator<R: Read + Seek> {
    definitions: DefinitionIterator<R>,
}

impl<R: Read + Seek> EntryIterator<R> {
    /// Number of chunks decompressed so far.
    pub fn chunks_read(&self) -> usize {
        self.definitions.chunks_read()
    }
}

impl<R: Read + Seek> Iterator for EntryIterator<R> {
    type Item = Result<(DictionaryDefinition, Entry)>;

    fn next(&mut self) -> Option<Self::Item> {
        let definition = match self.definitions.next()? {
            Ok(definition) => definition,
            Err(e) => return Some(Err(e)),
        };
        match grammar::parse_definition(&definition) {
            Ok(entry) => Some(Ok((definition, entry))),
            Err(e) => Some(Err(e)),
        }
    }
}
