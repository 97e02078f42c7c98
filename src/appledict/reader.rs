use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::info;

use super::format::container;
use super::iter::{DefinitionIterator, EntryIterator};
use super::types::error::Result;
use super::types::models::{ChunkMeta, ContainerLayout};
use super::utils;

/// The main reader for Apple dictionary containers (`Body.data`).
///
/// The reader is consumed by iteration: the container is walked strictly
/// forward, one chunk at a time. To scan again, open the source again.
#[derive(Debug)]
pub struct AppleDictReader<R: Read + Seek> {
    source: R,
    layout: ContainerLayout,
    encoding: &'static Encoding,
    chunk_limit: u64,
}

impl AppleDictReader<BufReader<File>> {
    /// Opens a container file with the standard Apple layout.
    ///
    /// # Arguments
    /// * `path` - Path to the `Body.data` file inside a `.dictionary` bundle
    /// * `user_encoding` - Optional encoding label for the entry text (default UTF-8)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header is invalid.
    pub fn open(path: impl AsRef<Path>, user_encoding: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Apple dictionary: {}", path.display());
        let file = File::open(path)?;
        Self::new(BufReader::new(file), ContainerLayout::default(), user_encoding)
    }
}

impl<R: Read + Seek> AppleDictReader<R> {
    /// Reads the container header from any seekable byte source.
    pub fn new(mut source: R, layout: ContainerLayout, user_encoding: Option<&str>) -> Result<Self> {
        let encoding = user_encoding.map(utils::parse_encoding).unwrap_or(UTF_8);
        let chunk_limit = container::read_chunk_limit(&mut source, &layout)?;

        info!(
            "Container opened: chunk table ends at {:#x}, text encoding {}",
            chunk_limit,
            encoding.name()
        );

        Ok(Self {
            source,
            layout,
            encoding,
            chunk_limit,
        })
    }

    /// Offset at which the chunk table ends.
    pub fn chunk_limit(&self) -> u64 {
        self.chunk_limit
    }

    pub fn layout(&self) -> &ContainerLayout {
        &self.layout
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Returns `true` while the source is positioned before the chunk table limit.
    pub(crate) fn has_more_chunks(&mut self) -> Result<bool> {
        Ok(self.source.stream_position()? < self.chunk_limit)
    }

    /// Reads and decompresses the chunk at the current position.
    pub(crate) fn read_next_chunk(&mut self, index: usize) -> Result<(ChunkMeta, Vec<u8>)> {
        container::read_chunk(&mut self.source, &self.layout, index)
    }

    /// Returns the lazy sequence of raw definitions, one chunk decoded at a time.
    ///
    /// Chain with [`DefinitionIterator::parse_entries`] to run the entry grammar.
    pub fn definitions(self) -> DefinitionIterator<R> {
        DefinitionIterator::new(self)
    }

    /// Shortcut for `reader.definitions().parse_entries()`.
    pub fn entries(self) -> EntryIterator<R> {
        self.definitions().parse_entries()
    }
}
