//! Top-level entry grammar.
//!
//! ```text
//! d:entry
//! ├── span.hg            head group: headword, variant, pronunciations
//! ├── span.sg            definition group: one or more span.se1
//! └── trailing sections  span.t_phrases | span.t_derivatives | span.etym
//! ```

use log::trace;

use crate::appledict::markup::{find_at_most_one, find_exactly_one, MarkupTree, Node, Query};
use crate::appledict::types::entry::{DictionaryDefinition, Entry, Sense};
use crate::appledict::types::error::{AppleDictError, Result};

use super::classes::{self, DefinitionGroupChild, EntrySection};
use super::{definitions, pronunciation, sections, sense};

/// Parses the markup of one fragment into an [`Entry`].
pub fn parse(tree: &MarkupTree) -> Result<Entry> {
    let entry = find_exactly_one(tree.root(), &Query::tag(classes::ENTRY))?;
    let head = find_exactly_one(entry, &Query::span(classes::HEAD_GROUP))?;
    let definition_group = find_exactly_one(entry, &Query::span(classes::SENSE_GROUPS))?;

    let (word, variant) = parse_headword(head)?;
    trace!("Parsing entry '{}' (variant {:?})", word, variant);

    let pronunciations = pronunciation::parse(head)?;
    let senses = parse_senses(definition_group)?;

    let mut phrases = Vec::new();
    let mut origin = None;
    let mut derivatives = Vec::new();

    for child in entry.children() {
        if child == head || child == definition_group {
            continue;
        }
        match EntrySection::classify(&child)? {
            EntrySection::Phrases => phrases = definitions::parse(child)?,
            EntrySection::Derivatives => derivatives = sections::parse_derivatives(child)?,
            EntrySection::Etymology => origin = Some(sections::parse_origin(child)?),
            EntrySection::Blank => {}
        }
    }

    Ok(Entry {
        word,
        variant,
        senses,
        pronunciations,
        phrases,
        origin,
        derivatives,
    })
}

/// Parses the markup carried by a raw definition.
///
/// Records without markup (e.g. generated text) cannot be parsed.
pub fn parse_definition(definition: &DictionaryDefinition) -> Result<Entry> {
    let tree = definition.parsed_markup.as_ref().ok_or_else(|| {
        AppleDictError::assumption(format!("definition '{}' carries no markup", definition.title))
    })?;
    parse(tree)
}

/// The word is made of the headword span's own text runs; nested spans such as
/// the homograph number are excluded.
fn parse_headword(head: Node) -> Result<(String, Option<u32>)> {
    let headword = find_exactly_one(head, &Query::span(classes::HEADWORD))?;
    let word = headword
        .direct_text_runs()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let variant = find_at_most_one(headword, &Query::span(classes::VARIANT))?
        .map(|span| {
            let text = span.trimmed_text();
            text.parse::<u32>().map_err(|e| {
                AppleDictError::assumption(format!("variant {:?} of '{}' is not a number: {}", text, word, e))
            })
        })
        .transpose()?;

    Ok((word, variant))
}

fn parse_senses(definition_group: Node) -> Result<Vec<Sense>> {
    let mut senses = Vec::new();
    for child in definition_group.children() {
        match DefinitionGroupChild::classify(&child)? {
            DefinitionGroupChild::Sense => senses.push(sense::parse(child)?),
            DefinitionGroupChild::Blank => {}
        }
    }

    if senses.is_empty() {
        return Err(AppleDictError::assumption(format!(
            "no senses found in {:?}",
            definition_group.trimmed_text()
        )));
    }
    Ok(senses)
}
