//! Pronunciation block of the head group.

use crate::appledict::markup::{find_at_least_one, find_at_most_one, Node, Query};
use crate::appledict::types::entry::Pronunciation;
use crate::appledict::types::error::{AppleDictError, Result};

use super::classes;

/// Returns `None` when the head group has no pronunciation block or it is blank.
///
/// The block is either a `prx` or a `pr` span; `prx` is preferred.
pub fn parse(head: Node) -> Result<Option<Vec<Pronunciation>>> {
    let enclosure = match find_at_most_one(head, &Query::span(classes::PRONUNCIATION_ENCLOSURE))? {
        Some(node) => Some(node),
        None => find_at_most_one(head, &Query::span(classes::PRONUNCIATION_GROUP))?,
    };

    let Some(enclosure) = enclosure.filter(|e| !e.is_blank()) else {
        return Ok(None);
    };

    find_at_least_one(enclosure, &Query::span(classes::PHONETIC))?
        .into_iter()
        .map(|phonetic| -> Result<Pronunciation> {
            let kind = phonetic.attr(classes::PRONUNCIATION_TYPE_ATTR).ok_or_else(|| {
                AppleDictError::assumption(format!(
                    "phonetic span {:?} has no {} attribute",
                    phonetic.text(),
                    classes::PRONUNCIATION_TYPE_ATTR
                ))
            })?;
            Ok(Pronunciation {
                text: phonetic.text(),
                kind: kind.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
