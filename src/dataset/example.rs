//! Training text for language-model examples.
//!
//! The plain entry text starts with the headword, an optional homograph
//! number and an optional `| pronunciation |` block. The trainable body is
//! what follows; it is paired with a `<title>` marker carrying the headword.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::appledict::types::entry::DictionaryDefinition;
use crate::appledict::types::error::{AppleDictError, Result};

use super::split::SplitConfig;

pub const TITLE_OPEN: &str = "<title>";
pub const TITLE_CLOSE: &str = "</title>";

/// Wraps a headword in title markers.
pub fn title_markup(title: &str) -> String {
    format!("{}{}{}", TITLE_OPEN, title, TITLE_CLOSE)
}

/// The entry text with the leading headword, variant and pronunciation removed.
///
/// # Errors
/// Fails if the entry text does not start with its own title, or nothing is
/// left once the prefix is stripped.
pub fn training_body(definition: &DictionaryDefinition) -> Result<String> {
    let pattern = format!(r"^\s*{}\d*\s*(\|[^|]*\|)?\s*", regex::escape(&definition.title));
    let prefix = Regex::new(&pattern).map_err(|e| {
        AppleDictError::assumption(format!("cannot build prefix pattern for '{}': {}", definition.title, e))
    })?;

    let matched = prefix.find(&definition.entry_text).ok_or_else(|| {
        AppleDictError::assumption(format!(
            "couldn't match '{}' on {:?}",
            definition.title, definition.entry_text
        ))
    })?;

    let body = definition.entry_text[matched.end()..].trim();
    if body.is_empty() {
        return Err(AppleDictError::assumption(format!(
            "bad entry for '{}': {:?}",
            definition.title, definition.entry_text
        )));
    }
    Ok(body.to_string())
}

/// A headword and the body a model is trained to produce for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingText {
    pub title: String,
    pub body: String,
}

impl TrainingText {
    pub fn from_definition(definition: &DictionaryDefinition) -> Result<Self> {
        Ok(Self {
            title: definition.title.clone(),
            body: training_body(definition)?,
        })
    }

    /// `<title>word</title>body`, the layout generated text is parsed back from.
    pub fn render(&self) -> String {
        let mut out = title_markup(&self.title);
        out.push_str(&self.body);
        out
    }
}

/// Name of the feature cache file for a given model, split and truncation length.
///
/// The cache lives next to the source file:
/// `{model}_cached_lm_splits_{f0}_{f1}_split_idx_{i}_max_len_{n}_{file name}`.
pub fn cache_file_name(model_type: &str, split: &SplitConfig, max_len: usize, source: &Path) -> PathBuf {
    let fractions = split
        .fractions()
        .iter()
        .map(|f| format!("{:?}", f))
        .collect::<Vec<_>>()
        .join("_");
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!(
        "{}_cached_lm_splits_{}_split_idx_{}_max_len_{}_{}",
        model_type,
        fractions,
        split.index(),
        max_len,
        file_name
    ))
}
