//! Turning decoded model output back into dictionary records.

use std::collections::HashSet;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::appledict::types::entry::DictionaryDefinition;

static GENERATED_PATTERN: OnceLock<Regex> = OnceLock::new();

fn generated_regex() -> &'static Regex {
    GENERATED_PATTERN.get_or_init(|| Regex::new(r"<title>(.*?)</title>(.*)").expect("Invalid generated text regex pattern"))
}

/// Which generated headwords to keep.
#[derive(Debug, Clone)]
pub struct GeneratedFilter {
    /// Keep titles starting with an uppercase (or caseless) character.
    pub allow_proper_nouns: bool,
    /// Uppercased words that must not be produced, e.g. real headwords.
    blacklist: HashSet<String>,
}

impl GeneratedFilter {
    pub fn new(allow_proper_nouns: bool) -> Self {
        Self {
            allow_proper_nouns,
            blacklist: HashSet::new(),
        }
    }

    /// Adds words to the blacklist; matching is case-insensitive.
    pub fn with_blacklist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist
            .extend(words.into_iter().map(|w| w.as_ref().to_uppercase()));
        self
    }

    /// Checks a title against the blacklist, also trying it with a plural `S` removed.
    pub fn is_blacklisted(&self, title: &str) -> bool {
        let upper = title.to_uppercase();
        self.blacklist.contains(&upper) || self.blacklist.contains(upper.trim_end_matches('S'))
    }

    pub fn accepts(&self, title: &str) -> bool {
        if !self.allow_proper_nouns && looks_proper(title) {
            return false;
        }
        !self.is_blacklisted(title)
    }
}

impl Default for GeneratedFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A title counts as proper when its first character is unchanged by uppercasing.
/// Empty titles count as proper.
fn looks_proper(title: &str) -> bool {
    match title.chars().next() {
        Some(first) => first.to_uppercase().eq(std::iter::once(first)),
        None => true,
    }
}

/// Parses one decoded sample of the form `<title>word</title>definition`.
///
/// Returns `None` if the sample does not have that shape (logged) or the
/// filter rejects the title.
pub fn parse_generated(decoded: &str, filter: &GeneratedFilter) -> Option<DictionaryDefinition> {
    let Some(caps) = generated_regex().captures(decoded) else {
        warn!("Unable to match regex in {:?}", decoded);
        return None;
    };
    let title = caps[1].trim();
    if !filter.accepts(title) {
        return None;
    }
    Some(DictionaryDefinition::plain(title, caps[2].trim_end_matches('!')))
}

/// Parses samples in order until `limit` definitions are accepted.
pub fn collect_generated<'a, I>(samples: I, filter: &GeneratedFilter, limit: usize) -> Vec<DictionaryDefinition>
where
    I: IntoIterator<Item = &'a str>,
{
    samples
        .into_iter()
        .filter_map(|sample| parse_generated(sample, filter))
        .take(limit)
        .collect()
}
