//! Deterministic train/eval splits keyed on the entry title.
//!
//! A title is hashed into one of 10 000 buckets in `[0, 1)`; a split owns the
//! half-open interval between the cumulative fractions before and after it.
//! The same title therefore always lands in the same split, whatever the
//! order of the source.

use md5::{Digest, Md5};

use crate::appledict::types::entry::DictionaryDefinition;
use crate::appledict::types::error::{AppleDictError, Result};

const BUCKETS: u128 = 10_000;
const SUM_TOLERANCE: f64 = 1e-6;

/// Which share of the dictionary to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    fractions: Vec<f64>,
    index: usize,
}

impl SplitConfig {
    /// Creates a split selecting `fractions[index]`.
    ///
    /// # Errors
    /// Returns [`AppleDictError::InvalidSplit`] if the fractions are empty,
    /// negative, do not sum to 1, or `index` is out of range.
    pub fn new(fractions: Vec<f64>, index: usize) -> Result<Self> {
        if fractions.is_empty() {
            return Err(AppleDictError::InvalidSplit("no split fractions given".to_string()));
        }
        if let Some(bad) = fractions.iter().find(|f| !f.is_finite() || **f < 0.0) {
            return Err(AppleDictError::InvalidSplit(format!("invalid split fraction {}", bad)));
        }
        let total: f64 = fractions.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(AppleDictError::InvalidSplit(format!(
                "splits must sum to 1 (actual: {})",
                total
            )));
        }
        if index >= fractions.len() {
            return Err(AppleDictError::InvalidSplit(format!(
                "invalid split index {} (must be less than {})",
                index,
                fractions.len()
            )));
        }
        Ok(Self { fractions, index })
    }

    /// A single split holding everything.
    pub fn whole() -> Self {
        Self {
            fractions: vec![1.0],
            index: 0,
        }
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The `[start, end)` bucket interval owned by this split.
    pub fn range(&self) -> (f64, f64) {
        let start: f64 = self.fractions[..self.index].iter().sum();
        let end = start + self.fractions[self.index];
        // The last split must also own buckets lost to float rounding.
        if self.index + 1 == self.fractions.len() {
            (start, end.max(1.0))
        } else {
            (start, end)
        }
    }

    pub fn contains_title(&self, title: &str) -> bool {
        let value = bucket(title);
        let (start, end) = self.range();
        value >= start && value < end
    }

    pub fn contains(&self, definition: &DictionaryDefinition) -> bool {
        self.contains_title(&definition.title)
    }

    /// Keeps the definitions belonging to this split; errors pass through untouched.
    pub fn filter<I>(&self, definitions: I) -> impl Iterator<Item = Result<DictionaryDefinition>>
    where
        I: Iterator<Item = Result<DictionaryDefinition>>,
    {
        definitions.filter(move |item| match item {
            Ok(definition) => self.contains(definition),
            Err(_) => true,
        })
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::whole()
    }
}

/// Maps a title to its bucket value in `[0, 1)`: the MD5 digest of the UTF-8
/// title, read as a big-endian integer, modulo 10 000.
pub fn bucket(title: &str) -> f64 {
    let mut hasher = Md5::new();
    hasher.update(title.as_bytes());
    let digest: [u8; 16] = hasher.finalize().into();
    (u128::from_be_bytes(digest) % BUCKETS) as f64 / BUCKETS as f64
}
