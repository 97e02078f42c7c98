//! # Fragment Extraction
//!
//! Decompressed chunk text holds one `<d:entry ...>` fragment per line. This
//! module finds those fragments, pulls out their `d:title` attribute, and turns
//! each into a [`DictionaryDefinition`].

use std::sync::OnceLock;

use encoding_rs::Encoding;
use log::{trace, warn};
use regex::Regex;
use regex::bytes::Regex as BytesRegex;

use crate::appledict::markup::MarkupTree;
use crate::appledict::types::entry::DictionaryDefinition;
use crate::appledict::types::error::{AppleDictError, Result};
use crate::appledict::utils;

/// Matches one fragment: from `<d:entry` to the end of its line, any bytes.
static FRAGMENT_PATTERN: OnceLock<BytesRegex> = OnceLock::new();

/// Matches the raw (still escaped) title attribute of a fragment.
static TITLE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn fragment_regex() -> &'static BytesRegex {
    FRAGMENT_PATTERN.get_or_init(|| BytesRegex::new(r"(?-u)<d:entry[^\n]+").expect("Invalid fragment regex pattern"))
}

fn title_regex() -> &'static Regex {
    TITLE_PATTERN.get_or_init(|| Regex::new(r#"d:title="(.*?)""#).expect("Invalid title regex pattern"))
}

/// Byte slices of every fragment in a decompressed chunk, in order.
pub fn find_fragments(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    fragment_regex().find_iter(text).map(|m| m.as_bytes())
}

/// Decodes one fragment's bytes and parses it, see [`build_definition`].
pub fn decode_definition(bytes: &[u8], encoding: &'static Encoding) -> Result<Option<DictionaryDefinition>> {
    let fragment = utils::decode_text(bytes, encoding)?;
    build_definition(&fragment)
}

/// The raw `d:title` attribute value of a fragment, entities still escaped.
pub fn raw_title(fragment: &str) -> Result<&str> {
    title_regex()
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            let preview: String = fragment.chars().take(80).collect();
            AppleDictError::assumption(format!("fragment has no d:title attribute: {}", preview))
        })
}

/// Parses a fragment into a [`DictionaryDefinition`].
///
/// Returns `Ok(None)` for degenerate fragments whose title or body renders to
/// empty text; those occur in shipped dictionaries and are skipped with a
/// warning.
pub fn build_definition(fragment: &str) -> Result<Option<DictionaryDefinition>> {
    let title_markup = MarkupTree::parse(raw_title(fragment)?)?;
    let entry_markup = MarkupTree::parse(fragment)?;

    let title = title_markup.plain_text();
    let entry_text = entry_markup.plain_text();

    if title.is_empty() || entry_text.is_empty() {
        warn!("Invalid entry {:?}: {:?}", title, entry_text);
        return Ok(None);
    }

    trace!("Fragment '{}': {} nodes", title, entry_markup.len());
    Ok(Some(DictionaryDefinition {
        title,
        entry_text,
        parsed_markup: Some(entry_markup),
    }))
}
