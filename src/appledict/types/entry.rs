//! Structured dictionary entries and the raw records they are parsed from.

use crate::appledict::markup::MarkupTree;

/// A phonetic rendering of the headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pronunciation {
    pub text: String,
    /// Dialect or rendering type, taken from the `d:pr` attribute (e.g. `US`, `GB`).
    pub kind: String,
}

/// One sense of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub pos_modifier: Option<String>,
    pub text: String,
    pub examples: Vec<String>,
    pub topic: Option<String>,
    pub date: Option<String>,
}

/// A definition slot that points at another headword instead of stating a meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub pos_modifier: Option<String>,
    pub reference: String,
}

/// A single slot of a sense: either a real definition or a cross-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meaning {
    Definition(Definition),
    Reference(ReferenceDefinition),
}

impl Meaning {
    pub fn pos_modifier(&self) -> Option<&str> {
        match self {
            Meaning::Definition(d) => d.pos_modifier.as_deref(),
            Meaning::Reference(r) => r.pos_modifier.as_deref(),
        }
    }

    pub fn as_definition(&self) -> Option<&Definition> {
        match self {
            Meaning::Definition(d) => Some(d),
            Meaning::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceDefinition> {
        match self {
            Meaning::Reference(r) => Some(r),
            Meaning::Definition(_) => None,
        }
    }
}

/// Definitions grouped under a shared part of speech. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub pos: Option<String>,
    pub definitions: Vec<Meaning>,
}

/// A fully parsed dictionary entry.
///
/// `senses` is never empty: a fragment without senses fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    /// Homograph number, e.g. the `2` in "bass²".
    pub variant: Option<u32>,
    pub senses: Vec<Sense>,
    /// `None` when the head group carries no (or a blank) pronunciation block.
    pub pronunciations: Option<Vec<Pronunciation>>,
    pub phrases: Vec<Meaning>,
    pub origin: Option<String>,
    pub derivatives: Vec<String>,
}

/// One raw entry as found in the container, before grammar parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryDefinition {
    /// Plain text of the fragment's `d:title` attribute.
    pub title: String,
    /// Plain text rendering of the whole fragment.
    pub entry_text: String,
    /// The fragment's markup tree. Absent for records that did not come from a
    /// container (e.g. generated text).
    pub parsed_markup: Option<MarkupTree>,
}

impl DictionaryDefinition {
    /// Creates a record that carries no markup.
    pub fn plain(title: impl Into<String>, entry_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entry_text: entry_text.into(),
            parsed_markup: None,
        }
    }
}
