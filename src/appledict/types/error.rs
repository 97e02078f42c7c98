//! Custom error types for the apple-dict-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AppleDictError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A structural expectation about the entry markup or the container was violated.
    ///
    /// The entry grammar is closed: wrong cardinalities, unrecognized children and
    /// mismatched fixed literals all end up here instead of being approximated.
    #[error("Parse assumption violated: {0}")]
    ParseAssumption(String),

    /// An error occurred while inflating a chunk payload.
    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    /// The container layout is structurally invalid (bad offsets or sizes).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The markup could not be tokenised into a tree.
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// Decompressed text is not valid under the configured encoding.
    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// A dataset split configuration is inconsistent.
    #[error("Invalid split configuration: {0}")]
    InvalidSplit(String),
}

impl AppleDictError {
    /// Shorthand for building a [`AppleDictError::ParseAssumption`].
    pub fn assumption(msg: impl Into<String>) -> Self {
        AppleDictError::ParseAssumption(msg.into())
    }

    /// Returns `true` for errors confined to a single fragment. Iteration can
    /// continue past these; anything else ends the container scan.
    pub fn is_fragment_error(&self) -> bool {
        matches!(
            self,
            AppleDictError::ParseAssumption(_)
                | AppleDictError::MalformedMarkup(_)
                | AppleDictError::InvalidEncoding(_)
        )
    }
}

/// A convenience `Result` type alias using the crate's `AppleDictError` type.
pub type Result<T> = std::result::Result<T, AppleDictError>;
