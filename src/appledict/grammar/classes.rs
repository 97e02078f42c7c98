//! The closed vocabulary of element classes used by Apple dictionary entries,
//! and the per-position classification of children.
//!
//! Every grammar position that iterates direct children maps each child to one
//! of a finite set of shapes. Anything else is a
//! [`AppleDictError::ParseAssumption`]: unknown shapes surface instead of being
//! dropped.

use crate::appledict::markup::Node;
use crate::appledict::types::error::{AppleDictError, Result};

/// Tag of the fragment root.
pub const ENTRY: &str = "d:entry";
/// Attribute carrying a pronunciation's dialect/type.
pub const PRONUNCIATION_TYPE_ATTR: &str = "d:pr";

pub const HEAD_GROUP: &str = "hg";
pub const HEADWORD: &str = "hw";
pub const VARIANT: &str = "tg_hw";
pub const PRONUNCIATION_ENCLOSURE: &str = "prx";
pub const PRONUNCIATION_GROUP: &str = "pr";
pub const PHONETIC: &str = "ph";

pub const SENSE_GROUPS: &str = "sg";
pub const SENSE: &str = "se1";
pub const SUB_SENSE: &str = "se2";
pub const POS: &str = "tg_pos";
pub const POS_GROUP: &str = "posg";
pub const SENSE_HEADWORD: &str = "x_xdh";

pub const SENSE_ENTRY: &str = "msDict";
pub const DEFINITION: &str = "df";
pub const EXAMPLE: &str = "ex";
pub const TOPIC: &str = "lg";
pub const MODIFIER: &str = "gg";
pub const DATE: &str = "dg";
pub const XREF_GROUP: &str = "xrg";
pub const XREF: &str = "xr";

pub const PHRASES: &str = "t_phrases";
pub const DERIVATIVES: &str = "t_derivatives";
pub const DERIVATIVE: &str = "l";
pub const ETYMOLOGY: &str = "etym";
pub const ETYMOLOGY_LABEL: &str = "tg_etym";
pub const ORIGIN_TEXT: &str = "x_xo1";

/// The only etymology label the grammar accepts.
pub const ORIGIN_LABEL: &str = "ORIGIN";

fn unexpected(position: &str, node: &Node) -> AppleDictError {
    AppleDictError::assumption(format!(
        "unexpected child {:?} in {} (text: {:?})",
        node,
        position,
        node.trimmed_text()
    ))
}

/// A direct child of the fragment root, after the head and definition groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySection {
    Phrases,
    Derivatives,
    Etymology,
    /// Whitespace between sections.
    Blank,
}

impl EntrySection {
    pub fn classify(node: &Node) -> Result<Self> {
        if node.is_text() && node.is_blank() {
            return Ok(EntrySection::Blank);
        }
        if node.has_class(PHRASES) {
            Ok(EntrySection::Phrases)
        } else if node.has_class(DERIVATIVES) {
            Ok(EntrySection::Derivatives)
        } else if node.has_class(ETYMOLOGY) {
            Ok(EntrySection::Etymology)
        } else {
            Err(unexpected("entry", node))
        }
    }
}

/// A direct child of the definition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionGroupChild {
    Sense,
    Blank,
}

impl DefinitionGroupChild {
    pub fn classify(node: &Node) -> Result<Self> {
        if node.has_class(SENSE) {
            Ok(DefinitionGroupChild::Sense)
        } else if node.is_blank() {
            Ok(DefinitionGroupChild::Blank)
        } else {
            Err(unexpected("definition group", node))
        }
    }
}

/// A direct child of a sense that is split into sub-senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenseChild {
    /// Part-of-speech or headword labels, already consumed by the sense parser.
    Label,
    SubSense,
    Blank,
}

impl SenseChild {
    pub fn classify(node: &Node) -> Result<Self> {
        if node.has_class(POS) || node.has_class(POS_GROUP) || node.has_class(SENSE_HEADWORD) {
            Ok(SenseChild::Label)
        } else if node.is_blank() {
            Ok(SenseChild::Blank)
        } else if node.has_class(SUB_SENSE) {
            Ok(SenseChild::SubSense)
        } else {
            Err(unexpected("sense", node))
        }
    }
}
